//! Error types for Voronoi diagram construction

use std::fmt;

/// Errors that can occur while configuring or building a diagram
#[derive(Debug, Clone)]
pub enum VoronoiError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// No site positions were supplied
    EmptyInput,
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            VoronoiError::EmptyInput => write!(f, "at least one site position is required"),
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
