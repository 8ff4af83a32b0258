//! Model parameters for the aging-cell simulation.
//!
//! The breeding and mortality constants are fixed properties of the model and
//! are deliberately not runtime-configurable. [`SimConfig`] only covers what a
//! host may choose: grid dimensions, the random seed and presentation cadence.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

// Grid
pub const DEFAULT_ROWS: usize = 80;
pub const DEFAULT_COLS: usize = 150;
/// Autoplay cadence used by hosts, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

// Breeding
/// Neighbours must be strictly older than this to breed.
pub const MIN_BREED_AGE: u32 = 16;
/// Neighbours this old or older can no longer breed.
pub const MAX_BREED_AGE: u32 = 60;
pub const REQUIRED_PARENTS: usize = 2;
/// Fertility starts dropping past this age.
pub const REDUCED_FERTILITY_AGE: u32 = 35;
pub const REDUCED_FERTILITY_PER_YEAR_MULTIPLIER: f64 = 0.05;

// Death
pub const ADULT_MORTALITY_CHANCE: f64 = 0.05;
pub const CHILD_MORTALITY_CUTOFF: u32 = 6;
pub const CHILD_MORTALITY_MULTIPLIER: f64 = 0.1;
pub const ELDERLY_MORTALITY_CUTOFF: u32 = 65;
pub const ELDERLY_MORTALITY_MULTIPLIER: f64 = 0.05;
pub const LONELINESS_MINIMUM: usize = 2;
pub const CROWDED_MAXIMUM: usize = 4;
pub const LONELINESS_MORTALITY_MULTIPLIER: f64 = 0.5;
pub const CROWDED_MORTALITY_MULTIPLIER: f64 = 0.2;

/// Host-level simulation settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub rows: usize,
    pub cols: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub tick_interval_ms: u64,
    /// Log a metrics summary every this many ticks (0 disables it).
    pub report_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            report_interval: 100,
        }
    }
}

impl SimConfig {
    /// Checks the grid dimensions without allocating anything.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.rows, self.cols).map(|_| ())
    }
}

/// Returns the cell count for a `rows` x `cols` grid, or why it can't exist.
pub(crate) fn validate_dimensions(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(ConfigError::EmptyDimension { rows, cols });
    }
    // Neighbour wrapping is done in isize space.
    rows.checked_mul(cols)
        .filter(|_| isize::try_from(rows).is_ok() && isize::try_from(cols).is_ok())
        .ok_or(ConfigError::TooLarge { rows, cols })
}
