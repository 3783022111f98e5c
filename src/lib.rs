//! Fortune's sweepline Voronoi diagram builder
//!
//! Computes the Voronoi diagram of a set of 2D sites with Fortune's algorithm:
//! a horizontal directrix sweeps upward through the sites, maintaining a
//! beachline of parabolic arcs and a min-ordered event queue, and emits the
//! diagram incrementally as a half-edge mesh.
//!
//! # Quick Start
//!
//! ```rust
//! use fortune_voronoi::*;
//! use glam::DVec2;
//!
//! // Real sites plus distant guards so every real cell comes out bounded
//! let mut positions = vec![
//!     DVec2::new(100.0, 200.0),
//!     DVec2::new(400.0, 150.0),
//!     DVec2::new(250.0, 450.0),
//! ];
//! positions.extend(guard_sites(10_000.0));
//!
//! let config = DiagramConfigBuilder::new().seed(42).build();
//! let diagram = VoronoiDiagram::generate(positions, config).unwrap();
//!
//! // Walk one site's cell boundary
//! for edge in diagram.edges_owned_by(0) {
//!     let _ = &diagram.edges()[edge];
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) point-to-cell lookups using a KD-tree
//! - `serde`: Serialization support for configuration

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod diagram;
pub mod sweep;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{DiagramConfig, DiagramConfigBuilder};
pub use diagram::{VoronoiDiagram, HalfEdge, Site, EdgeIndex, guard_sites};
pub use sweep::{FortuneSweep, StepOutcome};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
