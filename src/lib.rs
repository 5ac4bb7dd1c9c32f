
//! # lock_overhead
//! Measures the per-call cost of protecting a shared 64-bit counter with
//! different synchronisation strategies: none, a mutex, a reader/writer lock in
//! read mode (non-recursive and recursive acquisition), a spin lock, and a
//! lock-free compare-and-swap loop.
//!
//! Each trial runs one strategy for a fixed wall-clock budget in batches of
//! increments and reports operations per second.

pub mod bench;
pub mod sync;
pub mod utils;

pub use bench::{BenchmarkRunner, ContentionResult, ResultReporter, TrialResult, run_contended};
pub use sync::{CounterStrategy, SharedCounter, SpinLock, StrategyKind};
pub use utils::{
    config::BenchConfig,
    error::{BenchError, BenchResult},
};
