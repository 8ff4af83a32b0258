use std::time::Duration;

use agelife_lib::app::Runner;
use agelife_lib::{init_logging, PopulationStats, SimConfig, Simulation, SparseSnapshot};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "headless")]
    mode: Mode,

    /// Number of grid rows
    #[arg(long, default_value_t = agelife_core::config::DEFAULT_ROWS)]
    rows: usize,

    /// Number of grid columns
    #[arg(long, default_value_t = agelife_core::config::DEFAULT_COLS)]
    cols: usize,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generations to simulate
    #[arg(short, long, default_value_t = 1000)]
    generations: u64,

    /// Delay between ticks in autoplay mode
    #[arg(long, default_value_t = agelife_core::config::DEFAULT_TICK_INTERVAL_MS)]
    interval_ms: u64,

    /// Log a summary every this many ticks (0 to disable)
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Print the final state as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    /// Tick as fast as possible
    Headless,
    /// Tick on a timer until done or interrupted
    Autoplay,
}

/// How often autoplay checks for Ctrl-C, completion and extinction.
const POLL_PERIOD: Duration = Duration::from_millis(10);

#[derive(Serialize)]
struct FinalState {
    stats: PopulationStats,
    cells: SparseSnapshot,
}

impl Args {
    fn config(&self) -> SimConfig {
        SimConfig {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            tick_interval_ms: self.interval_ms,
            report_interval: self.report_every,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = args.config();

    let sim = Simulation::from_config(&config).context("invalid grid configuration")?;
    tracing::info!(
        rows = config.rows,
        cols = config.cols,
        seed = ?config.seed,
        mode = ?args.mode,
        "Starting simulation"
    );

    let state = match args.mode {
        Mode::Headless => run_headless(sim, args.generations),
        Mode::Autoplay => {
            let interval = Duration::from_millis(config.tick_interval_ms);
            run_autoplay(sim, args.generations, interval).await?
        }
    };
    let stats = &state.stats;

    tracing::info!(
        generation = stats.generation,
        population = stats.population,
        mean_age = stats.mean_age,
        max_age = stats.max_age,
        "Simulation finished"
    );

    if args.json {
        let out = serde_json::to_string(&state)
            .context("failed to encode final state")?;
        println!("{out}");
    }

    Ok(())
}

fn final_state(sim: &Simulation) -> FinalState {
    FinalState {
        stats: sim.stats(),
        cells: sim.snapshot().to_sparse(),
    }
}

fn run_headless(mut sim: Simulation, generations: u64) -> FinalState {
    for _ in 0..generations {
        let report = sim.step();
        if report.population() == 0 {
            tracing::warn!(generation = sim.generation(), "Population extinct");
            break;
        }
    }
    final_state(&sim)
}

async fn run_autoplay(
    sim: Simulation,
    generations: u64,
    interval: Duration,
) -> Result<FinalState> {
    let mut runner = Runner::new(sim);
    runner.start_until(interval, Some(generations));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut poll = tokio::time::interval(POLL_PERIOD);

    loop {
        tokio::select! {
            res = &mut ctrl_c => {
                res.context("failed to listen for Ctrl-C")?;
                tracing::info!("Interrupted");
                break;
            }
            _ = poll.tick() => {
                if !runner.is_playing() {
                    break;
                }
                if runner.with_simulation(|sim| sim.grid().population() == 0) {
                    tracing::warn!(generation = runner.generation(), "Population extinct");
                    break;
                }
            }
        }
    }

    runner.stop();
    Ok(runner.with_simulation(final_state))
}
