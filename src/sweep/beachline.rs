//! Breakpoint arena and the ordered beachline
//!
//! The beachline is an ordered sequence of breakpoints; arcs are implicit
//! between consecutive entries. Breakpoints live in an arena addressed by
//! stable indices and are deactivated, never freed, when a circle event removes
//! them: a pending circle event may still name them, and resolves as a no-op
//! when it finds the liveness bit cleared.

use crate::diagram::{EdgeIndex, HalfEdge};

use super::parabola::{Parabola, ParabolaIndex};

/// Index into the beachline's breakpoint arena
pub type BreakpointIndex = usize;

/// The boundary between two adjacent beachline arcs
///
/// `left_edge` is the half-edge this breakpoint traces: its direction is the
/// breakpoint's direction of travel and its owner is `left_parabola`'s cell.
/// `right_edge` is always `left_edge`'s opposite.
///
/// The two breakpoints created for the very first site are sentinels with one
/// `None` side and no edges; their x positions evaluate to minus and plus
/// infinity so the arc scan needs no boundary special-casing. Sentinels never
/// merge and are never deactivated.
#[derive(Debug, Clone)]
pub struct Breakpoint {
    pub left_parabola: Option<ParabolaIndex>,
    pub right_parabola: Option<ParabolaIndex>,
    pub left_edge: Option<EdgeIndex>,
    pub right_edge: Option<EdgeIndex>,
    /// Cleared when a circle event removes this breakpoint (lazy deletion)
    pub active: bool,
}

/// Ordered sequence of breakpoints plus the arena backing them
///
/// Invariant: the breakpoint x positions, evaluated at the current directrix,
/// are non-decreasing left to right. A violation indicates a bug in the
/// intersection math or arc ordering and is surfaced by a debug assert in the
/// driver, not silently tolerated.
#[derive(Debug, Default)]
pub struct Beachline {
    slots: Vec<Breakpoint>,
    order: Vec<BreakpointIndex>,
    deactivated: usize,
}

impl Beachline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of breakpoints currently on the beachline
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total breakpoints ever allocated
    #[inline]
    pub fn created(&self) -> usize {
        self.slots.len()
    }

    /// Total breakpoints deactivated by circle events
    #[inline]
    pub fn deactivated(&self) -> usize {
        self.deactivated
    }

    #[inline]
    pub fn get(&self, index: BreakpointIndex) -> &Breakpoint {
        &self.slots[index]
    }

    /// Breakpoint index at an ordered beachline position
    #[inline]
    pub fn at(&self, position: usize) -> BreakpointIndex {
        self.order[position]
    }

    /// Allocate a breakpoint slot without placing it on the beachline
    pub fn alloc(&mut self, breakpoint: Breakpoint) -> BreakpointIndex {
        self.slots.push(breakpoint);
        self.slots.len() - 1
    }

    /// Seed the beachline with the first site's two sentinel breakpoints
    pub fn init(&mut self, left: BreakpointIndex, right: BreakpointIndex) {
        debug_assert!(self.order.is_empty());
        self.order.push(left);
        self.order.push(right);
    }

    /// Insert two breakpoints after position `position`, splitting the arc
    /// between `position` and `position + 1`
    pub fn split_arc(&mut self, position: usize, left: BreakpointIndex, right: BreakpointIndex) {
        self.order.insert(position + 1, right);
        self.order.insert(position + 1, left);
    }

    /// Replace the adjacent pair at `position`, `position + 1` with one merged
    /// breakpoint, deactivating both removed entries
    ///
    /// The removed slots stay allocated: in-flight circle events may still
    /// reference them and must find `active == false` when they pop.
    pub fn replace_pair(&mut self, position: usize, merged: BreakpointIndex) {
        let left = self.order[position];
        let right = self.order[position + 1];
        self.slots[left].active = false;
        self.slots[right].active = false;
        self.deactivated += 2;

        self.order[position] = merged;
        self.order.remove(position + 1);
    }

    /// Current beachline position of a breakpoint, if it is still on it
    pub fn position_of(&self, index: BreakpointIndex) -> Option<usize> {
        self.order.iter().position(|&i| i == index)
    }

    /// Whether `left` and `right` sit next to each other on the beachline
    pub fn are_adjacent(&self, left: BreakpointIndex, right: BreakpointIndex) -> bool {
        match self.position_of(left) {
            Some(position) => {
                position + 1 < self.order.len() && self.order[position + 1] == right
            }
            None => false,
        }
    }

    /// Lazily compute a breakpoint's x position at the current directrix
    ///
    /// Sentinel sides evaluate to the matching infinity. If a neighboring
    /// parabola is degenerate (a site exactly on the directrix) the breakpoint
    /// sits at that site's x. Otherwise the two parabolas are intersected and
    /// the root consistent with the traced edge's growth direction is chosen:
    /// negative x direction takes the smaller root, else the larger. Picking the
    /// wrong root would silently produce a self-intersecting beachline.
    pub fn x(
        &self,
        index: BreakpointIndex,
        parabolas: &[Parabola],
        edges: &[HalfEdge],
    ) -> Option<f64> {
        let breakpoint = &self.slots[index];
        let (left, right) = match (breakpoint.left_parabola, breakpoint.right_parabola) {
            (None, _) => return Some(f64::NEG_INFINITY),
            (_, None) => return Some(f64::INFINITY),
            (Some(left), Some(right)) => (left, right),
        };

        if parabolas[left].is_degenerate_line {
            return Some(parabolas[left].focus.x);
        }
        if parabolas[right].is_degenerate_line {
            return Some(parabolas[right].focus.x);
        }

        let (smaller, larger) = Parabola::intersect(&parabolas[left], &parabolas[right])?;
        let edge = breakpoint.left_edge?;
        if edges[edge].direction.x < 0.0 {
            Some(smaller)
        } else {
            Some(larger)
        }
    }

    /// A breakpoint's y position: whichever neighboring parabola exists and is
    /// not degenerate, evaluated at `x()`
    pub fn y(
        &self,
        index: BreakpointIndex,
        parabolas: &[Parabola],
        edges: &[HalfEdge],
    ) -> Option<f64> {
        let x = self.x(index, parabolas, edges)?;
        let breakpoint = &self.slots[index];
        let parabola = [breakpoint.left_parabola, breakpoint.right_parabola]
            .into_iter()
            .flatten()
            .map(|i| &parabolas[i])
            .find(|p| !p.is_degenerate_line)?;
        Some(parabola.evaluate(x))
    }

    /// Find the arc whose x-range contains `x`, returning the beachline
    /// position of its left breakpoint
    ///
    /// Linear scan over the ordered breakpoints. Because the x positions are
    /// monotone this could be a binary search; correctness does not depend on
    /// the scan order, only performance does.
    pub fn locate_arc(&self, x: f64, parabolas: &[Parabola], edges: &[HalfEdge]) -> usize {
        let mut position = 0;
        for i in 1..self.order.len() - 1 {
            // Equal-curvature neighbors have no readable x; skip them rather
            // than stopping the scan short of the target arc.
            let Some(bx) = self.x(self.order[i], parabolas, edges) else {
                continue;
            };
            if bx <= x {
                position = i;
            } else {
                break;
            }
        }
        position
    }

    /// Check the left-to-right x ordering invariant
    ///
    /// A small tolerance absorbs floating-point noise between freshly split
    /// breakpoints that share a root.
    pub fn is_ordered(&self, parabolas: &[Parabola], edges: &[HalfEdge]) -> bool {
        let mut previous = f64::NEG_INFINITY;
        for &index in &self.order {
            let Some(x) = self.x(index, parabolas, edges) else {
                continue;
            };
            if x.is_nan() || x < previous - 1e-6 {
                return false;
            }
            if x.is_finite() {
                previous = x;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn edge_with_direction(direction: DVec2) -> HalfEdge {
        HalfEdge {
            start_pos: DVec2::ZERO,
            direction,
            vertex_pos: None,
            prev: None,
            next: None,
            opposite: 0,
            parabola: 0,
        }
    }

    fn sentinel_pair(parabola: ParabolaIndex) -> (Breakpoint, Breakpoint) {
        (
            Breakpoint {
                left_parabola: None,
                right_parabola: Some(parabola),
                left_edge: None,
                right_edge: None,
                active: true,
            },
            Breakpoint {
                left_parabola: Some(parabola),
                right_parabola: None,
                left_edge: None,
                right_edge: None,
                active: true,
            },
        )
    }

    #[test]
    fn test_sentinel_x_is_infinite() {
        let parabolas = vec![Parabola::new(0, DVec2::new(1.0, 0.0), 2.0)];
        let edges: Vec<HalfEdge> = Vec::new();

        let mut beachline = Beachline::new();
        let (left, right) = sentinel_pair(0);
        let left = beachline.alloc(left);
        let right = beachline.alloc(right);
        beachline.init(left, right);

        assert_eq!(
            beachline.x(left, &parabolas, &edges),
            Some(f64::NEG_INFINITY)
        );
        assert_eq!(beachline.x(right, &parabolas, &edges), Some(f64::INFINITY));
        assert!(beachline.is_ordered(&parabolas, &edges));
    }

    #[test]
    fn test_locate_arc_with_sentinels_only() {
        let parabolas = vec![Parabola::new(0, DVec2::new(1.0, 0.0), 2.0)];
        let edges: Vec<HalfEdge> = Vec::new();

        let mut beachline = Beachline::new();
        let (left, right) = sentinel_pair(0);
        let left = beachline.alloc(left);
        let right = beachline.alloc(right);
        beachline.init(left, right);

        // Any x lands in the single unbounded arc.
        assert_eq!(beachline.locate_arc(-1000.0, &parabolas, &edges), 0);
        assert_eq!(beachline.locate_arc(1000.0, &parabolas, &edges), 0);
    }

    #[test]
    fn test_degenerate_parabola_pins_breakpoint() {
        // The right parabola's focus is on the directrix, so the breakpoint
        // sits at that focus's x regardless of the intersection math.
        let parabolas = vec![
            Parabola::new(0, DVec2::new(0.0, 0.0), 3.0),
            Parabola::new(1, DVec2::new(5.0, 3.0), 3.0),
        ];
        let edges: Vec<HalfEdge> = Vec::new();

        let mut beachline = Beachline::new();
        let bp = beachline.alloc(Breakpoint {
            left_parabola: Some(0),
            right_parabola: Some(1),
            left_edge: None,
            right_edge: None,
            active: true,
        });
        beachline.init(bp, bp);

        assert_eq!(beachline.x(bp, &parabolas, &edges), Some(5.0));
    }

    #[test]
    fn test_y_lies_on_both_parabolas() {
        let parabolas = vec![
            Parabola::new(0, DVec2::new(0.0, 1.0), 3.0),
            Parabola::new(1, DVec2::new(2.0, 2.0), 3.0),
        ];
        let edges = vec![edge_with_direction(DVec2::new(-1.0, 0.0))];

        let mut beachline = Beachline::new();
        let bp = beachline.alloc(Breakpoint {
            left_parabola: Some(0),
            right_parabola: Some(1),
            left_edge: Some(0),
            right_edge: None,
            active: true,
        });
        beachline.init(bp, bp);

        // The breakpoint is where the two arcs meet, so its y satisfies both.
        let x = beachline.x(bp, &parabolas, &edges).unwrap();
        let y = beachline.y(bp, &parabolas, &edges).unwrap();
        assert!((y - parabolas[0].evaluate(x)).abs() < 1e-9);
        assert!((y - parabolas[1].evaluate(x)).abs() < 1e-9);
    }

    #[test]
    fn test_y_skips_degenerate_neighbor() {
        // Left focus on the directrix: x pins to it and y must come from the
        // non-degenerate right arc.
        let parabolas = vec![
            Parabola::new(0, DVec2::new(5.0, 3.0), 3.0),
            Parabola::new(1, DVec2::new(0.0, 0.0), 3.0),
        ];
        let edges: Vec<HalfEdge> = Vec::new();

        let mut beachline = Beachline::new();
        let bp = beachline.alloc(Breakpoint {
            left_parabola: Some(0),
            right_parabola: Some(1),
            left_edge: None,
            right_edge: None,
            active: true,
        });
        beachline.init(bp, bp);

        assert_eq!(beachline.x(bp, &parabolas, &edges), Some(5.0));
        let y = beachline.y(bp, &parabolas, &edges).unwrap();
        assert!((y - parabolas[1].evaluate(5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_locate_arc_skips_unreadable_breakpoint() {
        // The first two parabolas share a focus height (equal curvature), so
        // the breakpoint between them has no readable x; the scan must pass
        // over it instead of stopping at it.
        let parabolas = vec![
            Parabola::new(0, DVec2::new(0.0, 5.0), 10.0),
            Parabola::new(1, DVec2::new(4.0, 5.0), 10.0),
            Parabola::new(2, DVec2::new(8.0, 6.0), 10.0),
        ];
        let edges = vec![edge_with_direction(DVec2::new(-1.0, 0.0))];

        let mut beachline = Beachline::new();
        let (left_sentinel, right_sentinel) = sentinel_pair(0);
        let left_sentinel = beachline.alloc(left_sentinel);
        let right_sentinel = beachline.alloc(right_sentinel);
        beachline.init(left_sentinel, right_sentinel);

        let unreadable = beachline.alloc(Breakpoint {
            left_parabola: Some(0),
            right_parabola: Some(1),
            left_edge: None,
            right_edge: None,
            active: true,
        });
        let readable = beachline.alloc(Breakpoint {
            left_parabola: Some(1),
            right_parabola: Some(2),
            left_edge: Some(0),
            right_edge: None,
            active: true,
        });
        beachline.split_arc(0, unreadable, readable);

        assert!(beachline.x(unreadable, &parabolas, &edges).is_none());
        let readable_x = beachline.x(readable, &parabolas, &edges).unwrap();

        assert_eq!(
            beachline.locate_arc(readable_x + 1.0, &parabolas, &edges),
            2
        );
        assert_eq!(beachline.locate_arc(readable_x - 1.0, &parabolas, &edges), 0);
    }

    #[test]
    fn test_replace_pair_deactivates() {
        let mut beachline = Beachline::new();
        let (left, right) = sentinel_pair(0);
        let a = beachline.alloc(left.clone());
        let b = beachline.alloc(right.clone());
        beachline.init(a, b);

        let merged = beachline.alloc(Breakpoint {
            left_parabola: None,
            right_parabola: None,
            left_edge: None,
            right_edge: None,
            active: true,
        });
        beachline.replace_pair(0, merged);

        assert_eq!(beachline.len(), 1);
        assert!(!beachline.get(a).active);
        assert!(!beachline.get(b).active);
        assert!(beachline.get(merged).active);
        assert_eq!(beachline.deactivated(), 2);
        assert_eq!(beachline.created(), 3);
        assert!(!beachline.are_adjacent(a, b));
    }
}
