//! Error types for agelife_core.
//!
//! The simulation itself cannot fail once a grid exists; the only failure
//! class is asking for a grid that cannot be built.

use thiserror::Error;

/// Invalid construction request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One of the dimensions is zero
    #[error("Grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyDimension { rows: usize, cols: usize },

    /// The cell count does not fit in memory addressing
    #[error("Grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    /// A prebuilt cell buffer does not match the requested dimensions
    #[error("Expected {expected} cells for the requested dimensions, got {actual}")]
    CellCount { expected: usize, actual: usize },
}

/// Result type alias for agelife_core operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
