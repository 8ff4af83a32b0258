//! Play / step / stop scheduling around a shared simulation.
//!
//! The engine has no notion of time. `Runner` drives it at a fixed cadence on
//! a tokio task and keeps the simulation behind one lock, so a tick always
//! runs to completion before the next step, snapshot or stop takes effect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use agelife_core::{RandomSource, RngSource, Simulation, TickReport};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub struct Runner<S = RngSource> {
    sim: Arc<Mutex<Simulation<S>>>,
    playing: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

fn lock<S>(sim: &Mutex<Simulation<S>>) -> MutexGuard<'_, Simulation<S>> {
    // Every grid state is a valid state, so poisoning is ignored.
    sim.lock().unwrap_or_else(|e| e.into_inner())
}

impl<S> Runner<S>
where
    S: RandomSource + Send + 'static,
{
    pub fn new(sim: Simulation<S>) -> Self {
        Self {
            sim: Arc::new(Mutex::new(sim)),
            playing: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Starts ticking every `interval`, beginning immediately.
    ///
    /// Does nothing if already playing. Must be called inside a tokio runtime.
    pub fn start(&mut self, interval: Duration) {
        self.start_until(interval, None);
    }

    /// Like [`Runner::start`], but autoplay ends by itself once the
    /// simulation reaches generation `limit`.
    pub fn start_until(&mut self, interval: Duration, limit: Option<u64>) {
        if self.playing.swap(true, Ordering::SeqCst) {
            return;
        }
        // tokio rejects a zero period.
        let interval = interval.max(MIN_INTERVAL);
        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            limit = ?limit,
            "Autoplay started"
        );

        let sim = Arc::clone(&self.sim);
        let playing = Arc::clone(&self.playing);
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !playing.load(Ordering::SeqCst) {
                    break;
                }
                let mut state = lock(&sim);
                if limit.is_some_and(|limit| state.generation() >= limit) {
                    playing.store(false, Ordering::SeqCst);
                    tracing::info!(generation = state.generation(), "Autoplay reached limit");
                    break;
                }
                state.step();
            }
        }));
    }

    /// Stops autoplay. A tick already in progress finishes first.
    pub fn stop(&mut self) {
        let was_playing = self.playing.swap(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            // The task only yields between ticks, never inside one.
            task.abort();
        }
        if was_playing {
            tracing::info!(generation = self.generation(), "Autoplay stopped");
        }
    }

    /// Stops autoplay, then advances exactly one generation.
    pub fn step(&mut self) -> TickReport {
        self.stop();
        lock(&self.sim).step()
    }

    pub fn generation(&self) -> u64 {
        lock(&self.sim).generation()
    }

    /// Runs `f` with exclusive access to the simulation.
    pub fn with_simulation<T>(&self, f: impl FnOnce(&Simulation<S>) -> T) -> T {
        f(&*lock(&self.sim))
    }
}

impl<S> Drop for Runner<S> {
    fn drop(&mut self) {
        self.playing.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(seed: u64) -> Runner {
        let sim = Simulation::initialize(16, 24, RngSource::seeded(seed)).unwrap();
        Runner::new(sim)
    }

    #[test]
    fn test_step_without_runtime() {
        let mut runner = runner(1);
        runner.step();
        runner.step();
        assert_eq!(runner.generation(), 2);
        assert!(!runner.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_ticks_on_interval() {
        let mut runner = runner(2);
        runner.start(Duration::from_millis(500));
        assert!(runner.is_playing());

        // First tick fires immediately, then one per interval.
        tokio::time::sleep(Duration::from_millis(1250)).await;
        assert_eq!(runner.generation(), 3);

        runner.stop();
        assert!(!runner.is_playing());
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(runner.generation(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_stops_autoplay() {
        let mut runner = runner(3);
        runner.start(Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(50)).await;
        let before = runner.generation();

        runner.step();
        assert!(!runner.is_playing());
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(runner.generation(), before + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_stops_at_limit() {
        let mut runner = runner(5);
        runner.start_until(Duration::from_millis(100), Some(3));
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(runner.generation(), 3);
        assert!(!runner.is_playing());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_limit_is_exact_on_multi_thread_runtime() {
        let mut runner = runner(6);
        runner.start_until(Duration::from_millis(1), Some(5));
        while runner.is_playing() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(runner.generation(), 5);
    }

    #[test]
    fn test_with_simulation_reads_consistent_state() {
        let mut runner = runner(7);
        runner.step();
        let (stats, sparse) =
            runner.with_simulation(|sim| (sim.stats(), sim.snapshot().to_sparse()));
        assert_eq!(stats.generation, 1);
        let living: usize = sparse.values().map(|row| row.len()).sum();
        assert_eq!(living, stats.population);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_noop() {
        let mut runner = runner(4);
        runner.start(Duration::from_millis(100));
        runner.start(Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(runner.generation(), 4);
        runner.stop();
    }
}
