//! Hosting for the agelife engine: the autoplay scheduler used by the CLI.

pub mod app;

pub use agelife_core::{
    init_logging, initialize, snapshot, tick, ConfigError, FixedSource, Grid, PopulationStats,
    RandomSource, RngSource, SimConfig, Simulation, Snapshot, TickReport,
};
pub use agelife_data::{AgeClass, SparseSnapshot};
pub use app::Runner;
