//! Fortune's sweepline algorithm driver
//!
//! Orchestrates one sweep step at a time: pop the event with the smallest
//! trigger, advance the directrix, refresh every live parabola, and dispatch to
//! site-event or circle-event handling, scheduling newly discovered circle
//! events along the way.
//!
//! The sweep is strictly sequential; each step mutates the shared beachline and
//! queue and must complete before the next begins. [`FortuneSweep::step`]
//! exists as an explicit single-step function purely so a caller can interleave
//! one step per animation frame, as a scheduling convenience at the boundary
//! rather than concurrency inside the algorithm.

pub mod beachline;
pub mod events;
pub mod parabola;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DiagramConfig;
use crate::diagram::{EdgeIndex, HalfEdge, Site, VoronoiDiagram};
use crate::error::{Result, VoronoiError};
use crate::geometry::{perpendicular, ray_intersection};

use beachline::{Beachline, Breakpoint, BreakpointIndex};
use events::{EventQueue, SweepEvent};
use parabola::{Parabola, ParabolaIndex};

/// What a single sweep step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A site event inserted a new arc into the beachline
    SiteInserted { site: usize },
    /// A circle event resolved a Voronoi vertex
    VertexResolved { position: DVec2 },
    /// A circle event referencing removed breakpoints was discarded
    StaleCircleDiscarded,
    /// The event queue is empty; the diagram is complete
    Finished,
}

/// Incremental Fortune's-algorithm state
///
/// Exclusively owns the event queue, beachline, and the growing half-edge and
/// parabola arenas for the duration of one diagram computation. Drive it with
/// [`step`](Self::step) or [`run`](Self::run), then take the result with
/// [`into_diagram`](Self::into_diagram).
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
/// use glam::DVec2;
///
/// let positions = vec![DVec2::new(0.0, 0.0), DVec2::new(4.0, 3.0)];
/// let config = DiagramConfigBuilder::new().seed(9).build();
///
/// let mut sweep = FortuneSweep::new(positions, &config).unwrap();
/// while sweep.step() != StepOutcome::Finished {
///     // one event per iteration; a caller could yield here between frames
/// }
/// let diagram = sweep.into_diagram();
/// assert_eq!(diagram.edge_count(), 2);
/// ```
pub struct FortuneSweep {
    sites: Vec<Site>,
    parabolas: Vec<Parabola>,
    edges: Vec<HalfEdge>,
    beachline: Beachline,
    queue: EventQueue,
    directrix_y: f64,
}

impl FortuneSweep {
    /// Ingest site positions and enqueue their site events
    ///
    /// A per-axis uniform jitter of magnitude `config.jitter_epsilon` is
    /// applied here, from an RNG seeded by `config.seed`, to break the exact
    /// coincidences (shared x, shared y, concyclic quadruples) that would
    /// otherwise produce degenerate breakpoint positions.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when `positions` is empty.
    pub fn new(positions: Vec<DVec2>, config: &DiagramConfig) -> Result<Self> {
        if positions.is_empty() {
            return Err(VoronoiError::EmptyInput);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let epsilon = config.jitter_epsilon;
        let sites: Vec<Site> = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| {
                let jitter = if epsilon > 0.0 {
                    DVec2::new(
                        rng.gen_range(-epsilon..=epsilon),
                        rng.gen_range(-epsilon..=epsilon),
                    )
                } else {
                    DVec2::ZERO
                };
                Site {
                    index,
                    position: position + jitter,
                }
            })
            .collect();

        let mut queue = EventQueue::new();
        for site in &sites {
            queue.push(SweepEvent::Site {
                trigger_y: site.position.y,
                site: site.index,
            });
        }

        Ok(Self {
            sites,
            parabolas: Vec::new(),
            edges: Vec::new(),
            beachline: Beachline::new(),
            queue,
            directrix_y: f64::NEG_INFINITY,
        })
    }

    /// Process the next event
    ///
    /// Returns `Finished` once the queue is drained; calling again afterwards
    /// keeps returning `Finished`.
    pub fn step(&mut self) -> StepOutcome {
        let Some(event) = self.queue.pop_min() else {
            return StepOutcome::Finished;
        };

        self.directrix_y = event.trigger_y();
        for parabola in &mut self.parabolas {
            parabola.reset(self.directrix_y);
        }

        let outcome = match event {
            SweepEvent::Site { site, .. } => self.handle_site(site),
            SweepEvent::Circle {
                left_breakpoint,
                right_breakpoint,
                vertex,
                ..
            } => self.handle_circle(left_breakpoint, right_breakpoint, vertex),
        };

        debug_assert!(
            self.beachline.is_ordered(&self.parabolas, &self.edges),
            "beachline x-order violated at directrix {}",
            self.directrix_y
        );

        outcome
    }

    /// Drive the sweep to completion
    pub fn run(&mut self) {
        while self.step() != StepOutcome::Finished {}
    }

    /// Whether every event has been processed
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Current directrix height; moves monotonically upward across steps
    #[inline]
    pub fn directrix_y(&self) -> f64 {
        self.directrix_y
    }

    #[inline]
    pub fn edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    #[inline]
    pub fn beachline(&self) -> &Beachline {
        &self.beachline
    }

    /// Consume the sweep and return the accumulated half-edge mesh
    ///
    /// Each half-edge whose opposite resolved is anchored at that resolved
    /// vertex here, so a fully resolved pair reads as the segment
    /// `vertex_pos`-`opposite.vertex_pos` with `start_pos` matching the
    /// opposite's vertex. This must not happen during the sweep: a half's
    /// `start_pos` is the ray anchor its breakpoint schedules circle events
    /// with, and moving it would admit crossings the breakpoint already
    /// passed.
    ///
    /// Edges whose far end never resolved are unbounded rays belonging to the
    /// outer face; clipping them is the caller's concern.
    pub fn into_diagram(mut self) -> VoronoiDiagram {
        for index in 0..self.edges.len() {
            let opposite = self.edges[index].opposite;
            if let Some(vertex) = self.edges[opposite].vertex_pos {
                self.edges[index].start_pos = vertex;
            }
        }
        VoronoiDiagram::new(self.sites, self.edges, self.parabolas)
    }

    /// Insert the new site's arc into the beachline
    fn handle_site(&mut self, site: usize) -> StepOutcome {
        let position = self.sites[site].position;
        let parabola_index = self.parabolas.len();
        self.parabolas
            .push(Parabola::new(site, position, self.directrix_y));

        if self.beachline.is_empty() {
            // First site: one unbounded arc framed by the two sentinels.
            let left = self.beachline.alloc(Breakpoint {
                left_parabola: None,
                right_parabola: Some(parabola_index),
                left_edge: None,
                right_edge: None,
                active: true,
            });
            let right = self.beachline.alloc(Breakpoint {
                left_parabola: Some(parabola_index),
                right_parabola: None,
                left_edge: None,
                right_edge: None,
                active: true,
            });
            self.beachline.init(left, right);
            return StepOutcome::SiteInserted { site };
        }

        let slot = self
            .beachline
            .locate_arc(position.x, &self.parabolas, &self.edges);
        let outer_left = self.beachline.at(slot);
        let outer_right = self.beachline.at(slot + 1);
        let old_parabola = self
            .beachline
            .get(outer_left)
            .right_parabola
            .expect("arc between breakpoints has a parabola");

        let old = &self.parabolas[old_parabola];
        let start = DVec2::new(
            position.x,
            if old.is_degenerate_line {
                position.y
            } else {
                old.evaluate(position.x)
            },
        );

        // The split arc's edge pair grows along the bisector of the old focus
        // and the new site, perpendicular to their separation.
        let seam = position - old.focus;
        let direction = perpendicular(seam).normalize();
        let (edge_left, edge_right) =
            self.create_edge_pair(start, direction, old_parabola, parabola_index);

        let new_left = self.beachline.alloc(Breakpoint {
            left_parabola: Some(old_parabola),
            right_parabola: Some(parabola_index),
            left_edge: Some(edge_left),
            right_edge: Some(edge_right),
            active: true,
        });
        let new_right = self.beachline.alloc(Breakpoint {
            left_parabola: Some(parabola_index),
            right_parabola: Some(old_parabola),
            left_edge: Some(edge_right),
            right_edge: Some(edge_left),
            active: true,
        });
        self.beachline.split_arc(slot, new_left, new_right);

        self.try_schedule_circle(outer_left, new_left);
        self.try_schedule_circle(new_right, outer_right);

        StepOutcome::SiteInserted { site }
    }

    /// Merge two breakpoints at their shared Voronoi vertex
    fn handle_circle(
        &mut self,
        left: BreakpointIndex,
        right: BreakpointIndex,
        vertex: DVec2,
    ) -> StepOutcome {
        // Lazy deletion: an intervening event may have removed either
        // breakpoint, or split the arc between them. Such events are no-ops.
        if !self.beachline.get(left).active
            || !self.beachline.get(right).active
            || !self.beachline.are_adjacent(left, right)
        {
            return StepOutcome::StaleCircleDiscarded;
        }

        let left_breakpoint = self.beachline.get(left).clone();
        let right_breakpoint = self.beachline.get(right).clone();
        let left_parabola = left_breakpoint
            .left_parabola
            .expect("merging breakpoint has a left arc");
        let right_parabola = right_breakpoint
            .right_parabola
            .expect("merging breakpoint has a right arc");

        let left_grown = left_breakpoint
            .left_edge
            .expect("non-sentinel breakpoint traces an edge");
        let right_grown = right_breakpoint
            .left_edge
            .expect("non-sentinel breakpoint traces an edge");
        let left_opposite = self.edges[left_grown].opposite;
        let right_opposite = self.edges[right_grown].opposite;

        // Both traced rays terminate here. Only the grown halves are marked;
        // an opposite half may still be traced by a live breakpoint, and its
        // start_pos is that breakpoint's ray anchor for circle scheduling.
        // Anchoring starts to resolved opposite ends happens in into_diagram.
        self.edges[left_grown].vertex_pos = Some(vertex);
        self.edges[right_grown].vertex_pos = Some(vertex);

        // One new pair rooted at the vertex, growing along the bisector of the
        // two surviving arcs' foci.
        let direction = perpendicular(
            self.parabolas[right_parabola].focus - self.parabolas[left_parabola].focus,
        )
        .normalize();
        let (new_edge, new_opposite) =
            self.create_edge_pair(vertex, direction, left_parabola, right_parabola);
        self.edges[new_opposite].vertex_pos = Some(vertex);

        // Stitch the three cell boundary chains through the vertex: the new
        // edges continue the surviving neighbors' boundaries, and the
        // collapsing arc's own boundary closes across it.
        self.edges[left_grown].next = Some(new_edge);
        self.edges[new_edge].prev = Some(left_grown);
        self.edges[right_grown].next = Some(left_opposite);
        self.edges[left_opposite].prev = Some(right_grown);
        self.edges[new_opposite].next = Some(right_opposite);
        self.edges[right_opposite].prev = Some(new_opposite);

        let slot = self
            .beachline
            .position_of(left)
            .expect("active breakpoint is on the beachline");
        let merged = self.beachline.alloc(Breakpoint {
            left_parabola: Some(left_parabola),
            right_parabola: Some(right_parabola),
            left_edge: Some(new_edge),
            right_edge: Some(new_opposite),
            active: true,
        });
        self.beachline.replace_pair(slot, merged);

        // The surviving arcs gained new outer neighbors; re-test both sides.
        if slot > 0 {
            self.try_schedule_circle(self.beachline.at(slot - 1), merged);
        }
        if slot + 1 < self.beachline.len() {
            self.try_schedule_circle(merged, self.beachline.at(slot + 1));
        }

        StepOutcome::VertexResolved { position: vertex }
    }

    /// Create two mutually opposite half-edges rooted at `start`
    ///
    /// The first gets `direction` and bounds `left_owner`'s cell; the second
    /// gets the mirrored direction and bounds `right_owner`'s cell.
    fn create_edge_pair(
        &mut self,
        start: DVec2,
        direction: DVec2,
        left_owner: ParabolaIndex,
        right_owner: ParabolaIndex,
    ) -> (EdgeIndex, EdgeIndex) {
        let first = self.edges.len();
        let second = first + 1;
        self.edges.push(HalfEdge {
            start_pos: start,
            direction,
            vertex_pos: None,
            prev: None,
            next: None,
            opposite: second,
            parabola: left_owner,
        });
        self.edges.push(HalfEdge {
            start_pos: start,
            direction: -direction,
            vertex_pos: None,
            prev: None,
            next: None,
            opposite: first,
            parabola: right_owner,
        });
        (first, second)
    }

    /// Test a breakpoint pair's traced rays for a future convergence
    ///
    /// Every failure mode here (sentinel neighbor, parallel rays, intersection
    /// behind a ray start, convergence behind the directrix) is a local skip of
    /// this one candidate, never an error.
    fn try_schedule_circle(&mut self, left: BreakpointIndex, right: BreakpointIndex) {
        let left_breakpoint = self.beachline.get(left);
        let right_breakpoint = self.beachline.get(right);
        let (Some(left_edge), Some(right_edge)) =
            (left_breakpoint.left_edge, right_breakpoint.left_edge)
        else {
            return;
        };
        let Some(middle) = left_breakpoint.right_parabola else {
            return;
        };

        let a = &self.edges[left_edge];
        let b = &self.edges[right_edge];
        let Some(hit) = ray_intersection(a.start_pos, a.direction, b.start_pos, b.direction)
        else {
            return;
        };

        // The event fires when the sweep reaches the bottom of the circle
        // through the three foci: vertex y plus circumradius. Convergences at
        // or behind the directrix are already history.
        let trigger_y = hit.y + hit.distance(self.parabolas[middle].focus);
        if trigger_y > self.directrix_y {
            self.queue.push(SweepEvent::Circle {
                trigger_y,
                left_breakpoint: left,
                right_breakpoint: right,
                vertex: hit,
            });
        }
    }
}
