
// Synchronisation layer: the protected counter, the spin lock primitive and the
// six increment strategies measured by the harness.

pub mod counter;
pub mod read_lock;
pub mod spin_lock;
pub mod strategy;

pub use counter::SharedCounter;
pub use read_lock::{NonRecursiveReadGuard, NonRecursiveRwLock};
pub use spin_lock::{SpinGuard, SpinLock};
pub use strategy::{CounterStrategy, StrategyKind};
