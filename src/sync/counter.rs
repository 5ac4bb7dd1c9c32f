
//! The 64-bit counter every strategy protects.
//!
//! Backed by an `AtomicI64` so that the unsynchronized strategies can race on
//! it without undefined behaviour: they issue a separate `load` and `store`,
//! which loses updates under concurrency exactly like a plain `counter += 1`.
//! Callers outside the crate can only `reset()` and `read()`; every write goes
//! through a strategy.

use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Default)]
pub struct SharedCounter {
    value: AtomicI64,
}

impl SharedCounter {
    pub fn new() -> Self {
        Self {
            value: AtomicI64::new(0),
        }
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::SeqCst);
    }

    pub fn read(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    // Plain read half of a read-modify-write. Ordering comes from the caller's lock, if any.
    #[inline]
    pub(crate) fn load_raw(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn store_raw(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Single CAS attempt; returns the value actually observed on failure.
    #[inline]
    pub(crate) fn compare_exchange_weak(&self, current: i64, new: i64) -> Result<i64, i64> {
        self.value
            .compare_exchange_weak(current, new, Ordering::AcqRel, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(SharedCounter::new().read(), 0);
    }

    #[test]
    fn reset_always_reads_zero() {
        let counter = SharedCounter::new();
        counter.store_raw(42);
        counter.reset();
        assert_eq!(counter.read(), 0);

        counter.store_raw(-7);
        counter.reset();
        counter.reset();
        assert_eq!(counter.read(), 0);
    }
}
