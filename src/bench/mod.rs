
// Trial driver and result formatting.

pub mod reporter;
pub mod runner;

pub use reporter::ResultReporter;
pub use runner::{BenchmarkRunner, ContentionResult, TrialResult, run_contended};
