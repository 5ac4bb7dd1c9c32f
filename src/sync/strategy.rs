
//! strategy.rs
//! Synchronisation strategies for a shared counter increment.
//!
//! Every strategy has the same observable effect (counter + 1) and differs only
//! in how it coordinates:
//! - NoLock: bare read-modify-write (baseline, loses updates under concurrency)
//! - MutexLock: exclusive lock around the read-modify-write
//! - SharedExclusive*: reader/writer lock taken in READ mode around the mutation.
//!   Shared mode does not exclude other readers, so this also loses updates; it
//!   measures a common misuse, not a correct pattern. The non-recursive variant
//!   tracks per-thread ownership and refuses re-entry; the recursive one grants it.
//! - SpinLock: busy-wait flag, released by guard drop
//! - AtomicCAS: lock-free load / +1 / compare-and-swap retry loop

use std::fmt;

use log::trace;
use parking_lot::{Mutex, RwLock};

use crate::sync::{counter::SharedCounter, read_lock::NonRecursiveRwLock, spin_lock::SpinLock};
use crate::utils::{
    config::DEFAULT_CAS_MAX_ATTEMPTS,
    error::{BenchError, BenchResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    NoLock,
    MutexLock,
    SharedExclusiveNonRecursive,
    SharedExclusiveRecursive,
    SpinLock,
    AtomicCAS,
}

impl StrategyKind {
    /// Fixed trial order.
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::NoLock,
        StrategyKind::MutexLock,
        StrategyKind::SharedExclusiveNonRecursive,
        StrategyKind::SharedExclusiveRecursive,
        StrategyKind::SpinLock,
        StrategyKind::AtomicCAS,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::NoLock => "NoLock",
            StrategyKind::MutexLock => "MutexLock",
            StrategyKind::SharedExclusiveNonRecursive => "SharedExclusiveNonRecursive",
            StrategyKind::SharedExclusiveRecursive => "SharedExclusiveRecursive",
            StrategyKind::SpinLock => "SpinLock",
            StrategyKind::AtomicCAS => "AtomicCAS",
        }
    }

    /// Whether concurrent callers are guaranteed not to lose updates.
    pub fn is_exclusive(self) -> bool {
        matches!(
            self,
            StrategyKind::MutexLock | StrategyKind::SpinLock | StrategyKind::AtomicCAS
        )
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Lock object owned by one strategy for the lifetime of the run.
#[derive(Debug)]
enum Coordination {
    None,
    Mutex(Mutex<()>),
    // Re-entry from the owning thread is refused; the recursive variant grants it.
    ReadNonRecursive(NonRecursiveRwLock),
    ReadRecursive(RwLock<()>),
    Spin(SpinLock),
    Cas { max_attempts: u32 },
}

/// One strategy together with the counter it protects.
///
/// Lock construction happens here, before any trial starts, so it never falls
/// inside a measured interval. The instance is `Sync` and may be driven from
/// many threads at once.
#[derive(Debug)]
pub struct CounterStrategy {
    kind: StrategyKind,
    counter: SharedCounter,
    coordination: Coordination,
}

impl CounterStrategy {
    pub fn new(kind: StrategyKind) -> Self {
        Self::with_cas_max_attempts(kind, DEFAULT_CAS_MAX_ATTEMPTS)
    }

    /// `max_attempts` only matters for [`StrategyKind::AtomicCAS`].
    pub fn with_cas_max_attempts(kind: StrategyKind, max_attempts: u32) -> Self {
        let coordination = match kind {
            StrategyKind::NoLock => Coordination::None,
            StrategyKind::MutexLock => Coordination::Mutex(Mutex::new(())),
            StrategyKind::SharedExclusiveNonRecursive => {
                Coordination::ReadNonRecursive(NonRecursiveRwLock::new())
            }
            StrategyKind::SharedExclusiveRecursive => Coordination::ReadRecursive(RwLock::new(())),
            StrategyKind::SpinLock => Coordination::Spin(SpinLock::new()),
            StrategyKind::AtomicCAS => Coordination::Cas { max_attempts },
        };
        trace!("[CounterStrategy] created {}", kind);
        Self {
            kind,
            counter: SharedCounter::new(),
            coordination,
        }
    }

    /// One strategy per kind, in trial order.
    pub fn all(cas_max_attempts: u32) -> Vec<CounterStrategy> {
        StrategyKind::ALL
            .iter()
            .map(|&kind| Self::with_cas_max_attempts(kind, cas_max_attempts))
            .collect()
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn counter(&self) -> &SharedCounter {
        &self.counter
    }

    /// Adds one to the counter under this strategy's coordination.
    ///
    /// Fails when AtomicCAS runs out of attempts, or when the calling thread
    /// already holds the SharedExclusiveNonRecursive read lock.
    #[inline]
    pub fn increment(&self) -> BenchResult<()> {
        match &self.coordination {
            Coordination::None => {
                self.bump();
            }
            Coordination::Mutex(m) => {
                let _g = m.lock();
                self.bump();
            }
            Coordination::ReadNonRecursive(rw) => {
                let _g = rw.read()?;
                self.bump();
            }
            Coordination::ReadRecursive(rw) => {
                let _g = rw.read_recursive();
                self.bump();
            }
            Coordination::Spin(spin) => {
                let _g = spin.lock();
                self.bump();
            }
            Coordination::Cas { max_attempts } => {
                self.cas_increment(*max_attempts)?;
            }
        }
        Ok(())
    }

    // Read-modify-write with no ordering of its own; the caller's guard (if any) provides it.
    #[inline(always)]
    fn bump(&self) {
        let v = self.counter.load_raw();
        self.counter.store_raw(v.wrapping_add(1));
    }

    #[inline]
    fn cas_increment(&self, max_attempts: u32) -> BenchResult<()> {
        let mut current = self.counter.load_raw();
        for _ in 0..max_attempts {
            match self.counter.compare_exchange_weak(current, current.wrapping_add(1)) {
                Ok(_) => return Ok(()),
                // Someone else got in first (or a spurious failure): retry from what we saw.
                Err(observed) => current = observed,
            }
        }
        Err(BenchError::CasRetriesExhausted {
            attempts: max_attempts,
        })
    }
}
