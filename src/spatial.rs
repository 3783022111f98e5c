//! Spatial indexing for fast position-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::DVec2;
#[cfg(feature = "spatial-index")]
use crate::diagram::VoronoiDiagram;

/// Wrapper around a KD-tree for point-location queries
///
/// Answering "which cell contains this point" for a Voronoi diagram is exactly
/// a nearest-site query, so an O(log n) nearest-neighbor lookup over the site
/// positions locates a cell without ever touching the edge mesh.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build a spatial index from site positions
    ///
    /// # Example
    ///
    /// ```
    /// use fortune_voronoi::*;
    /// use glam::DVec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(10.0, 0.0),
    ///     DVec2::new(5.0, 10.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(DVec2::new(9.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(positions: &[DVec2]) -> Self {
        // kiddo wants fixed-size coordinate arrays.
        let points: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Build a spatial index over a diagram's (jittered) site positions
    ///
    /// Site indices returned by [`find_nearest`](Self::find_nearest) then match
    /// the diagram's site numbering directly.
    pub fn from_diagram(diagram: &VoronoiDiagram) -> Self {
        let positions: Vec<DVec2> = diagram.sites().iter().map(|s| s.position).collect();
        Self::new(&positions)
    }

    /// Index of the site nearest to `position`, i.e. the Voronoi cell
    /// containing it
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;
    use crate::config::DiagramConfigBuilder;
    use crate::diagram::guard_sites;

    #[test]
    fn test_spatial_index_basic() {
        let positions = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(10.0, 10.0),
        ];

        let index = SpatialIndex::new(&positions);

        assert_eq!(index.find_nearest(DVec2::new(1.0, 1.0)), 0);
        assert_eq!(index.find_nearest(DVec2::new(9.0, 2.0)), 1);
        assert_eq!(index.find_nearest(DVec2::new(2.0, 9.0)), 2);
        assert_eq!(index.find_nearest(DVec2::new(8.0, 8.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let positions = vec![DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)];
        let index = SpatialIndex::new(&positions);

        assert_eq!(index.find_nearest(positions[0]), 0);
        assert_eq!(index.find_nearest(positions[1]), 1);
    }

    #[test]
    fn test_from_diagram_matches_site_numbering() {
        let mut positions = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 10.0),
        ];
        positions.extend(guard_sites(1_000.0));

        let config = DiagramConfigBuilder::new().seed(2).build();
        let diagram = VoronoiDiagram::generate(positions, config).unwrap();
        let index = SpatialIndex::from_diagram(&diagram);

        for site in diagram.sites() {
            assert_eq!(index.find_nearest(site.position), site.index);
        }
    }
}
