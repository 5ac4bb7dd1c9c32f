
//! Trial configuration.
//!
//! The binary takes no arguments; the defaults below reproduce the reference
//! protocol (10 s trials, 10,000-call batches). Tests and benches shorten the
//! duration through the `with_*` setters.

use std::time::Duration;

use crate::utils::error::{BenchError, BenchResult};

pub const DEFAULT_TRIAL_DURATION_SECS: u64 = 10;
pub const BATCH_SIZE: u64 = 10_000;         // increments between two clock reads
pub const DEFAULT_CAS_MAX_ATTEMPTS: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Wall-clock budget of one trial. The in-flight batch always finishes.
    pub duration_limit: Duration,
    pub batch_size: u64,
    /// Cap on compare-and-swap attempts per increment (AtomicCAS only).
    pub cas_max_attempts: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            duration_limit: Duration::from_secs(DEFAULT_TRIAL_DURATION_SECS),
            batch_size: BATCH_SIZE,
            cas_max_attempts: DEFAULT_CAS_MAX_ATTEMPTS,
        }
    }
}

impl BenchConfig {
    pub fn with_duration(mut self, duration_limit: Duration) -> Self {
        self.duration_limit = duration_limit;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_cas_max_attempts(mut self, attempts: u32) -> Self {
        self.cas_max_attempts = attempts;
        self
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.batch_size == 0 {
            return Err(BenchError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.cas_max_attempts == 0 {
            return Err(BenchError::InvalidConfig(
                "cas_max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
