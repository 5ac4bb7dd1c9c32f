
//! Busy-wait lock over a single `AtomicBool`.
//!
//! Acquisition never yields or parks the thread: it spins on a relaxed load
//! until the flag looks free, then tries a `compare_exchange_weak`. Release is a
//! `Release` store performed by the guard's `Drop`, so it runs on every exit
//! path out of the critical section, unwinding included.

use std::{
    hint,
    sync::atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Default)]
pub struct SpinLock {
    locked: AtomicBool,
}

/// Holds the lock until dropped.
#[must_use = "the spin lock is released as soon as the guard is dropped"]
pub struct SpinGuard<'a> {
    lock: &'a SpinLock,
}

impl SpinLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    pub fn lock(&self) -> SpinGuard<'_> {
        loop {
            if self
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return SpinGuard { lock: self };
            }
            // Spin on a plain load so waiters don't keep the cache line exclusive.
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    pub fn try_lock(&self) -> Option<SpinGuard<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| SpinGuard { lock: self })
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    /// Runs `f` with the lock held.
    #[inline]
    pub fn with_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock();
        f()
    }
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn guard_releases_on_drop() {
        let lock = SpinLock::new();
        {
            let _g = lock.lock();
            assert!(lock.is_locked());
            assert!(lock.try_lock().is_none());
        }
        assert!(!lock.is_locked());
        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn released_when_critical_section_panics() {
        let lock = SpinLock::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            lock.with_lock(|| -> u32 { panic!("mutation failed") });
        }));
        assert!(outcome.is_err());
        assert!(!lock.is_locked());
        // would spin forever if the flag had leaked
        let value = lock.with_lock(|| 7);
        assert_eq!(value, 7);
    }
}
