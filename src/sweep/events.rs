//! Sweep events and the min-ordered event queue
//!
//! The queue is a literal min-priority-queue keyed on the sweep coordinate,
//! built on `BinaryHeap` with an inverted comparator. Circle events are never
//! removed from the queue when they become invalid; they are discarded at pop
//! time when a referenced breakpoint has been deactivated (lazy deletion).

use glam::DVec2;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::beachline::BreakpointIndex;

/// An event to be processed by the sweep
///
/// Ordering key is `trigger_y`: the directrix height at which the event fires.
#[derive(Debug, Clone)]
pub enum SweepEvent {
    /// A new site becomes reachable by the sweep
    Site {
        /// Directrix height at which the event fires (the site's y)
        trigger_y: f64,
        /// Index into the sweep's site list
        site: usize,
    },
    /// Three consecutive arcs converge; the two named breakpoints merge
    Circle {
        /// Directrix height at which the event fires (vertex y plus circumradius)
        trigger_y: f64,
        /// Left breakpoint of the collapsing arc
        left_breakpoint: BreakpointIndex,
        /// Right breakpoint of the collapsing arc
        right_breakpoint: BreakpointIndex,
        /// Voronoi vertex position, computed when the event was scheduled
        vertex: DVec2,
    },
}

impl SweepEvent {
    /// The directrix height at which this event fires
    #[inline]
    pub fn trigger_y(&self) -> f64 {
        match self {
            SweepEvent::Site { trigger_y, .. } => *trigger_y,
            SweepEvent::Circle { trigger_y, .. } => *trigger_y,
        }
    }
}

/// Heap entry with ordering inverted so the smallest trigger pops first
#[derive(Debug, Clone)]
struct QueueEntry(SweepEvent);

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.trigger_y().total_cmp(&other.0.trigger_y()) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted: BinaryHeap is a max-heap, we want the minimum trigger_y.
        other.0.trigger_y().total_cmp(&self.0.trigger_y())
    }
}

/// Min-priority-queue of sweep events keyed by `trigger_y`
///
/// `pop_min` returning `None` signals that the algorithm is complete. There is
/// no cancel operation; see the module docs for how stale circle events die.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<QueueEntry>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Add an event; never fails
    pub fn push(&mut self, event: SweepEvent) {
        self.heap.push(QueueEntry(event));
    }

    /// Remove and return the event with the smallest `trigger_y`
    pub fn pop_min(&mut self) -> Option<SweepEvent> {
        self.heap.pop().map(|entry| entry.0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
