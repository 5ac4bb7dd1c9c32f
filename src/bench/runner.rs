
//! Fixed-duration trial driver.
//!
//! Measurement protocol:
//! - counter reset immediately before the clock starts
//! - increments issued in batches of `batch_size`; the clock is read once per
//!   batch so timer overhead stays out of the fast strategies' numbers
//! - the loop stops once elapsed >= duration_limit, after the in-flight batch,
//!   so at least one batch always runs and the real elapsed time is reported
//!
//! `run_contended` drives one strategy from several threads at once and reports
//! how many updates survived. It is what the correctness tests and the
//! contention bench use; the reference trial itself is single-threaded.

use std::{
    hint::black_box,
    sync::Barrier,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::sync::strategy::CounterStrategy;
use crate::utils::{
    config::BenchConfig,
    error::{BenchError, BenchResult},
};

#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub strategy_name: &'static str,
    pub ops_completed: u64,
    pub elapsed_seconds: f64,
}

impl TrialResult {
    /// Operations per second over the measured (not nominal) elapsed time.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.ops_completed as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// Outcome of one multi-threaded run.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentionResult {
    pub strategy_name: &'static str,
    pub threads: usize,
    pub expected: u64,
    pub observed: i64,
    pub elapsed_seconds: f64,
}

impl ContentionResult {
    pub fn lost_updates(&self) -> u64 {
        self.expected.saturating_sub(self.observed.max(0) as u64)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BenchmarkRunner {
    config: BenchConfig,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> BenchResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs one trial for the configured duration.
    pub fn run(&self, strategy: &CounterStrategy) -> BenchResult<TrialResult> {
        self.run_for(strategy, self.config.duration_limit)
    }

    /// Runs one trial with an explicit duration limit.
    pub fn run_for(
        &self,
        strategy: &CounterStrategy,
        duration_limit: Duration,
    ) -> BenchResult<TrialResult> {
        let batch = self.config.batch_size;
        info!(
            "[Trial] {} starting: limit={:?}, batch={}",
            strategy.name(),
            duration_limit,
            batch
        );

        strategy.counter().reset();
        let mut issued: u64 = 0;
        let start = Instant::now();

        loop {
            for _ in 0..batch {
                black_box(strategy).increment()?;
            }
            issued += batch;
            if start.elapsed() >= duration_limit {
                break;
            }
        }

        let elapsed = start.elapsed();
        let observed = strategy.counter().read();

        if observed < 0 || observed as u64 != issued {
            return Err(BenchError::LostUpdates {
                strategy: strategy.name(),
                expected: issued,
                observed,
            });
        }

        let result = TrialResult {
            strategy_name: strategy.name(),
            ops_completed: observed as u64,
            elapsed_seconds: elapsed.as_secs_f64(),
        };
        debug!(
            "[Trial] {} done: ops={} elapsed={:.3}s",
            result.strategy_name, result.ops_completed, result.elapsed_seconds
        );
        Ok(result)
    }

    /// Runs every strategy in the order given, one trial each.
    pub fn run_all(&self, strategies: &[CounterStrategy]) -> BenchResult<Vec<TrialResult>> {
        strategies.iter().map(|s| self.run(s)).collect()
    }
}

/// Drives `strategy` from `threads` workers, each issuing `ops_per_thread` increments.
///
/// Workers are released together by a barrier to maximise overlap. Lost updates
/// are reported, not treated as errors.
pub fn run_contended(
    strategy: &CounterStrategy,
    threads: usize,
    ops_per_thread: u64,
) -> BenchResult<ContentionResult> {
    if threads == 0 {
        return Err(BenchError::InvalidConfig("threads must be at least 1".into()));
    }

    strategy.counter().reset();
    let barrier = Barrier::new(threads);
    let start = Instant::now();

    let outcome = crossbeam::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let barrier = &barrier;
                scope.spawn(move |_| -> BenchResult<()> {
                    barrier.wait();
                    for _ in 0..ops_per_thread {
                        strategy.increment()?;
                    }
                    Ok(())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<Vec<_>>()
    });

    let elapsed = start.elapsed();

    let joined = outcome.map_err(|_| BenchError::WorkerPanicked {
        strategy: strategy.name(),
    })?;
    for worker in joined {
        match worker {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(BenchError::WorkerPanicked {
                    strategy: strategy.name(),
                });
            }
        }
    }

    let result = ContentionResult {
        strategy_name: strategy.name(),
        threads,
        expected: threads as u64 * ops_per_thread,
        observed: strategy.counter().read(),
        elapsed_seconds: elapsed.as_secs_f64(),
    };

    if result.lost_updates() > 0 {
        warn!(
            "[Contention] {}: lost {} of {} updates across {} threads",
            result.strategy_name,
            result.lost_updates(),
            result.expected,
            threads
        );
    } else {
        debug!(
            "[Contention] {}: {} updates across {} threads in {:.3}s",
            result.strategy_name, result.observed, threads, result.elapsed_seconds
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::strategy::StrategyKind;

    fn short_runner(batch: u64) -> BenchmarkRunner {
        let cfg = BenchConfig::default()
            .with_duration(Duration::from_millis(20))
            .with_batch_size(batch);
        BenchmarkRunner::new(cfg).unwrap()
    }

    #[test]
    fn trial_never_stops_early_and_counts_whole_batches() {
        let runner = short_runner(1_000);
        for kind in StrategyKind::ALL {
            let s = CounterStrategy::new(kind);
            let r = runner.run(&s).unwrap();
            assert!(r.elapsed_seconds >= 0.020, "{}: {}", kind, r.elapsed_seconds);
            assert!(r.ops_completed > 0);
            assert_eq!(r.ops_completed % 1_000, 0, "{}", kind);
            assert_eq!(r.strategy_name, kind.name());
        }
    }

    #[test]
    fn zero_duration_still_runs_one_batch() {
        let runner = short_runner(500);
        let s = CounterStrategy::new(StrategyKind::MutexLock);
        let r = runner.run_for(&s, Duration::ZERO).unwrap();
        assert_eq!(r.ops_completed, 500);
    }

    #[test]
    fn counter_is_reset_between_trials() {
        let runner = short_runner(100);
        let s = CounterStrategy::new(StrategyKind::SpinLock);
        let first = runner.run_for(&s, Duration::ZERO).unwrap();
        let second = runner.run_for(&s, Duration::ZERO).unwrap();
        assert_eq!(first.ops_completed, 100);
        assert_eq!(second.ops_completed, 100);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = BenchConfig::default().with_batch_size(0);
        assert!(BenchmarkRunner::new(cfg).is_err());
    }

    #[test]
    fn throughput_uses_measured_elapsed() {
        let r = TrialResult {
            strategy_name: "NoLock",
            ops_completed: 30_000,
            elapsed_seconds: 1.5,
        };
        assert_eq!(r.throughput(), 20_000.0);
    }

    #[test]
    fn contended_run_rejects_zero_threads() {
        let s = CounterStrategy::new(StrategyKind::AtomicCAS);
        assert!(matches!(
            run_contended(&s, 0, 10),
            Err(BenchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn single_worker_contended_run_is_exact() {
        let s = CounterStrategy::new(StrategyKind::NoLock);
        let r = run_contended(&s, 1, 5_000).unwrap();
        assert_eq!(r.expected, 5_000);
        assert_eq!(r.observed, 5_000);
        assert_eq!(r.lost_updates(), 0);
    }
}
