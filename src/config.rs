//! Diagram configuration and builder
//!
//! This module provides configuration types for deterministic Voronoi diagram
//! construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Configuration for deterministic Voronoi diagram construction
///
/// The same configuration applied to the same site list will always produce the
/// identical half-edge mesh.
///
/// # Serialization
///
/// Only the configuration is serializable (with the `serde` feature), never the
/// generated diagram. A diagram is regenerated from its inputs when needed.
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .jitter_epsilon(1e-4)
///     .unwrap()
///     .build();
/// assert_eq!(config.seed, 42);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Random seed for the ingestion jitter
    ///
    /// The jitter RNG is owned by the sweep that consumes this configuration;
    /// there is no global RNG state anywhere in the crate.
    pub seed: u64,

    /// Magnitude of the coordinate jitter applied to every site at ingestion
    ///
    /// Each coordinate is perturbed independently by a uniform value in
    /// `[-jitter_epsilon, jitter_epsilon]`. The jitter breaks exact coincidences
    /// (shared x, shared y, concyclic quadruples) that would otherwise produce
    /// degenerate breakpoint positions. Set to `0.0` to disable, which is only
    /// safe for inputs already known to be in general position.
    pub jitter_epsilon: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        DiagramConfigBuilder::new().build()
    }
}

/// Builder for creating a [`DiagramConfig`] with validation
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
///
/// // Use defaults (random seed, jitter 1e-4)
/// let config = DiagramConfigBuilder::new().build();
///
/// // Customize
/// let config = DiagramConfigBuilder::new()
///     .seed(12345)
///     .jitter_epsilon(1e-5)
///     .unwrap()
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    seed: Option<u64>,
    jitter_epsilon: f64,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - jitter_epsilon: 1e-4
    pub fn new() -> Self {
        Self {
            seed: None,
            jitter_epsilon: 1e-4,
        }
    }

    /// Set the random seed for the ingestion jitter
    ///
    /// Using the same seed with the same site list produces an identical mesh.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the jitter magnitude
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the value is negative, NaN, or larger than 1.0
    /// (a jitter that big would visibly move sites rather than break ties).
    pub fn jitter_epsilon(mut self, epsilon: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(VoronoiError::InvalidConfig(format!(
                "jitter epsilon must be in [0, 1] (got {})",
                epsilon
            )));
        }
        self.jitter_epsilon = epsilon;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> DiagramConfig {
        DiagramConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            jitter_epsilon: self.jitter_epsilon,
        }
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
