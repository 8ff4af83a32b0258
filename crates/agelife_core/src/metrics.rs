//! Tick metrics collection for the simulation.
//!
//! Provides structured logging and running totals for monitoring
//! population health over long runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::tick::TickReport;

/// Running totals across every recorded tick.
pub struct Metrics {
    tick_count: AtomicU64,
    population: AtomicU64,
    total_births: AtomicU64,
    total_deaths: AtomicU64,
    busy_nanos: AtomicU64,
    report_interval: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics collector that reports every 100 ticks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            total_births: AtomicU64::new(0),
            total_deaths: AtomicU64::new(0),
            busy_nanos: AtomicU64::new(0),
            report_interval: 100,
        }
    }

    /// `0` turns the periodic summary off.
    pub fn set_report_interval(&mut self, interval: u64) {
        self.report_interval = interval;
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, report: &TickReport) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population
            .store(report.population() as u64, Ordering::Relaxed);
        self.total_births
            .fetch_add(report.births as u64, Ordering::Relaxed);
        self.total_deaths
            .fetch_add(report.deaths as u64, Ordering::Relaxed);
        self.busy_nanos.fetch_add(
            u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );

        if self.report_interval > 0 && tick % self.report_interval == 0 {
            tracing::info!(
                tick = tick,
                population = report.population(),
                births = self.total_births(),
                deaths = self.total_deaths(),
                mean_tick_us = self.mean_tick_duration().as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Gets the current tick count.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    /// Living cells after the most recent tick.
    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total_births(&self) -> u64 {
        self.total_births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total_deaths(&self) -> u64 {
        self.total_deaths.load(Ordering::Relaxed)
    }

    /// Average time spent inside a tick.
    #[must_use]
    pub fn mean_tick_duration(&self) -> Duration {
        match self.tick_count() {
            0 => Duration::ZERO,
            ticks => Duration::from_nanos(self.busy_nanos.load(Ordering::Relaxed) / ticks),
        }
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
