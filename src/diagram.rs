//! Half-edge mesh output of the sweep
//!
//! The diagram is a flat list of half-edge records plus the site list and the
//! per-site parabolas used during construction. Callers reconstruct per-site
//! polygons by walking `next` links starting from any edge owned by the target
//! site; clipping unbounded rays to a viewport is the caller's job, not this
//! crate's.

use glam::DVec2;

use crate::config::DiagramConfig;
use crate::error::Result;
use crate::sweep::parabola::{Parabola, ParabolaIndex};
use crate::sweep::FortuneSweep;

/// Index into the diagram's half-edge arena
pub type EdgeIndex = usize;

/// An input point that owns exactly one Voronoi cell
#[derive(Debug, Clone, Copy)]
pub struct Site {
    /// Position in the input list; stable across the whole computation
    pub index: usize,
    /// Position after ingestion jitter
    pub position: DVec2,
}

/// One directed side of a Voronoi edge
///
/// Half-edges are created in pairs of mutual opposites. A growing edge is a ray
/// (`start_pos` plus `direction`) whose far end is unresolved; a circle event
/// resolves it by filling `vertex_pos`. In a finished diagram every half whose
/// opposite resolved has been anchored at that resolved end, so a pair with
/// both ends resolved forms the segment from `vertex_pos` to
/// `opposite.vertex_pos` and `start_pos == opposite.vertex_pos` holds. Edges
/// that keep an unresolved end belong to the unbounded outer face and are
/// expected to be clipped by an external bounding step.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfEdge {
    /// Ray anchor while the edge grows; in a finished diagram, anchored at the
    /// opposite half's resolved end when that end exists
    pub start_pos: DVec2,
    /// Unit growth direction of the traced ray
    pub direction: DVec2,
    /// Resolved far end, filled by a circle event
    pub vertex_pos: Option<DVec2>,
    /// Previous edge around the owning cell
    pub prev: Option<EdgeIndex>,
    /// Next edge around the owning cell
    pub next: Option<EdgeIndex>,
    /// The paired half-edge bounding the neighboring cell
    pub opposite: EdgeIndex,
    /// Parabola (and therefore site) whose cell this half-edge bounds
    pub parabola: ParabolaIndex,
}

impl HalfEdge {
    /// Whether both neighbors in the cell boundary chain are linked
    ///
    /// A closed edge has a resolved vertex at both of its ends.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.prev.is_some() && self.next.is_some()
    }
}

/// The four conventional guard positions at `(±distance, 0)` and `(0, ±distance)`
///
/// Callers append these to their real sites so that every real cell ends up
/// bounded; the guards' own cells stay unbounded instead.
pub fn guard_sites(distance: f64) -> [DVec2; 4] {
    [
        DVec2::new(-distance, 0.0),
        DVec2::new(distance, 0.0),
        DVec2::new(0.0, -distance),
        DVec2::new(0.0, distance),
    ]
}

/// A completed Voronoi diagram as a half-edge soup
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
/// use glam::DVec2;
///
/// let mut positions = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(10.0, 0.0),
///     DVec2::new(5.0, 10.0),
/// ];
/// positions.extend(guard_sites(10_000.0));
///
/// let config = DiagramConfigBuilder::new().seed(42).build();
/// let diagram = VoronoiDiagram::generate(positions, config).unwrap();
/// assert_eq!(diagram.site_count(), 7);
/// assert!(diagram.edge_count() > 0);
/// ```
#[derive(Debug)]
pub struct VoronoiDiagram {
    sites: Vec<Site>,
    edges: Vec<HalfEdge>,
    parabolas: Vec<Parabola>,
}

impl VoronoiDiagram {
    /// Run the full sweep over the given positions
    ///
    /// This is the one-shot entry point; use [`FortuneSweep`] directly to drive
    /// the algorithm one event at a time.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when `positions` is empty.
    pub fn generate(positions: Vec<DVec2>, config: DiagramConfig) -> Result<Self> {
        let mut sweep = FortuneSweep::new(positions, &config)?;
        sweep.run();
        Ok(sweep.into_diagram())
    }

    pub(crate) fn new(sites: Vec<Site>, edges: Vec<HalfEdge>, parabolas: Vec<Parabola>) -> Self {
        Self {
            sites,
            edges,
            parabolas,
        }
    }

    /// All sites, with their jittered positions
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Every half-edge ever created, including still-growing unbounded rays
    #[inline]
    pub fn edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    /// The per-site parabolas used during construction
    ///
    /// Ordered by processing order (ascending site y), not input order; each
    /// carries its site index.
    #[inline]
    pub fn parabolas(&self) -> &[Parabola] {
        &self.parabolas
    }

    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The site whose cell a half-edge bounds
    #[inline]
    pub fn site_of_edge(&self, edge: EdgeIndex) -> usize {
        self.parabolas[self.edges[edge].parabola].site
    }

    /// Indices of all half-edges bounding the given site's cell
    ///
    /// Starting from any of these and following `next` links walks the cell's
    /// boundary polygon.
    pub fn edges_owned_by(&self, site: usize) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, edge)| self.parabolas[edge.parabola].site == site)
            .map(|(index, _)| index)
    }

    /// All resolved Voronoi vertex positions (one entry per resolved half-edge
    /// end; geometric vertices shared by several edges appear repeatedly)
    pub fn resolved_vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.edges.iter().filter_map(|edge| edge.vertex_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagramConfigBuilder;

    #[test]
    fn test_guard_sites_layout() {
        let guards = guard_sites(10_000.0);
        assert_eq!(guards.len(), 4);
        for guard in guards {
            assert_eq!(guard.length(), 10_000.0);
        }
    }

    #[test]
    fn test_generate_rejects_empty_input() {
        let config = DiagramConfigBuilder::new().seed(1).build();
        assert!(VoronoiDiagram::generate(Vec::new(), config).is_err());
    }

    #[test]
    fn test_single_site_diagram_has_no_edges() {
        let config = DiagramConfigBuilder::new().seed(1).build();
        let diagram =
            VoronoiDiagram::generate(vec![DVec2::new(3.0, 4.0)], config).unwrap();
        assert_eq!(diagram.site_count(), 1);
        assert_eq!(diagram.edge_count(), 0);
        assert_eq!(diagram.parabolas().len(), 1);
    }

    #[test]
    fn test_edges_owned_by_covers_all_edges() {
        let mut positions = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 10.0),
        ];
        positions.extend(guard_sites(1_000.0));

        let config = DiagramConfigBuilder::new().seed(7).build();
        let diagram = VoronoiDiagram::generate(positions, config).unwrap();

        let mut owned = 0;
        for site in 0..diagram.site_count() {
            owned += diagram.edges_owned_by(site).count();
        }
        assert_eq!(owned, diagram.edge_count());

        for site in 0..diagram.site_count() {
            for edge in diagram.edges_owned_by(site) {
                assert_eq!(diagram.site_of_edge(edge), site);
            }
        }
    }
}
