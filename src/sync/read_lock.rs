
//! Reader/writer lock that refuses re-entrant read acquisition.
//!
//! Each thread keeps the addresses of the `NonRecursiveRwLock`s it currently
//! reads under. A second `read()` on the same lock from the same thread fails
//! with `BenchError::LockRecursion` before touching the inner lock, so it can
//! never deadlock behind a waiting writer.

use std::cell::RefCell;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::utils::error::{BenchError, BenchResult};

thread_local! {
    static HELD_READ_LOCKS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Default)]
pub struct NonRecursiveRwLock {
    inner: RwLock<()>,
}

/// Read access; clears this thread's ownership entry on drop.
#[must_use = "the read lock is released as soon as the guard is dropped"]
pub struct NonRecursiveReadGuard<'a> {
    id: usize,
    _guard: RwLockReadGuard<'a, ()>,
}

impl NonRecursiveRwLock {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(()),
        }
    }

    fn id(&self) -> usize {
        self as *const Self as usize
    }

    pub fn read(&self) -> BenchResult<NonRecursiveReadGuard<'_>> {
        let id = self.id();
        let reentered = HELD_READ_LOCKS.with(|held| {
            let mut held = held.borrow_mut();
            if held.contains(&id) {
                true
            } else {
                held.push(id);
                false
            }
        });
        if reentered {
            return Err(BenchError::LockRecursion);
        }
        Ok(NonRecursiveReadGuard {
            id,
            _guard: self.inner.read(),
        })
    }

    /// Whether the calling thread holds a read guard on this lock.
    pub fn is_read_held_by_current_thread(&self) -> bool {
        let id = self.id();
        HELD_READ_LOCKS.with(|held| held.borrow().contains(&id))
    }
}

impl Drop for NonRecursiveReadGuard<'_> {
    fn drop(&mut self) {
        let id = self.id;
        HELD_READ_LOCKS.with(|held| {
            let mut held = held.borrow_mut();
            if let Some(pos) = held.iter().position(|&h| h == id) {
                held.swap_remove(pos);
            }
        });
    }
}
