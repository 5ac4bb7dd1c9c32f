
//! # Lock Overhead Entry Point
//! Runs one fixed-duration, single-threaded trial per synchronisation strategy
//! and prints the achieved increment rate.
//!
//! ## Protocol
//! - All six strategies (and their lock objects) are built before the first trial.
//! - Each trial: reset counter → batches of 10,000 increments → clock checked
//!   once per batch → stop after 10 s (the in-flight batch finishes).
//! - Output order: NoLock, MutexLock, SharedExclusiveNonRecursive,
//!   SharedExclusiveRecursive, SpinLock, AtomicCAS.
//!
//! Logging goes to stderr through `RUST_LOG`; stdout only carries the results.

use std::{error::Error, io::stdout};

use lock_overhead::{BenchConfig, BenchmarkRunner, CounterStrategy, ResultReporter};
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("=== LOCK OVERHEAD START ===");

    let config = BenchConfig::default();
    let runner = BenchmarkRunner::new(config)?;

    // Lock construction stays outside every measured interval.
    let strategies = CounterStrategy::all(config.cas_max_attempts);

    let mut reporter = ResultReporter::new(stdout().lock());
    for strategy in &strategies {
        let result = runner.run(strategy)?;
        reporter.report(&result)?;
    }

    info!("=== LOCK OVERHEAD FINISHED ===");
    Ok(())
}
