
//! Error type shared by the strategies, the runner and the reporter.
//!
//! Nothing here is recoverable for the caller: any error aborts the whole run
//! (no partial results are reported).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    /// The CAS loop gave up after its configured number of attempts.
    #[error("compare-and-swap gave up after {attempts} attempts")]
    CasRetriesExhausted { attempts: u32 },

    /// Counter disagrees with the number of increments issued by a single-threaded trial.
    #[error("{strategy}: counter reads {observed} after {expected} increments")]
    LostUpdates {
        strategy: &'static str,
        expected: u64,
        observed: i64,
    },

    /// A thread tried to take a non-recursive read lock it already holds.
    #[error("read lock re-entered by the thread that already holds it")]
    LockRecursion,

    #[error("{strategy}: contention worker panicked")]
    WorkerPanicked { strategy: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;
