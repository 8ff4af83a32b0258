//! # Agelife Core
//!
//! The simulation engine for Agelife - a population of aging cells on a
//! toroidal grid.
//!
//! Each tick, every empty cell may be bred by eligible neighbours and every
//! living cell either dies or grows one generation older. Rules read from a
//! snapshot of the previous generation, so the order cells are visited in
//! never changes the outcome of a neighbour lookup.
//!
//! ## Example
//!
//! ```
//! use agelife_core::{tick, Grid, RngSource};
//!
//! let mut rng = RngSource::seeded(42);
//! let mut grid = Grid::initialize(80, 150, &mut rng).unwrap();
//!
//! let report = tick(&mut grid, &mut rng);
//! assert_eq!(report.population(), grid.population());
//! ```

/// Breeding rule for empty cells
pub mod breeding;
/// Fixed model constants and host settings
pub mod config;
pub mod error;
/// Toroidal age grid
pub mod grid;
/// Tick metrics and structured logging
pub mod metrics;
/// Mortality rule for living cells
pub mod mortality;
pub mod neighbors;
/// Injectable randomness
pub mod random;
/// Frozen per-tick view of the grid
pub mod snapshot;
/// Tick driver and the owning `Simulation`
pub mod tick;

pub use agelife_data::{AgeClass, PopulationStats, SparseSnapshot};
pub use breeding::breed;
pub use config::SimConfig;
pub use error::{ConfigError, Result};
pub use grid::Grid;
pub use metrics::{init_logging, Metrics};
pub use mortality::dies;
pub use neighbors::{live_neighbors, Neighbors};
pub use random::{FixedSource, RandomSource, RngSource};
pub use snapshot::Snapshot;
pub use tick::{tick, Simulation, TickReport};

/// Builds a randomized grid. See [`Grid::initialize`].
pub fn initialize<S>(rows: usize, cols: usize, rng: &mut S) -> Result<Grid>
where
    S: RandomSource + ?Sized,
{
    Grid::initialize(rows, cols, rng)
}

/// Read-only export of the current ages. See [`Grid::snapshot`].
pub fn snapshot(grid: &Grid) -> Snapshot {
    grid.snapshot()
}
