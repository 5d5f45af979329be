//! Blocking lock primitives behind a single capability interface.
//!
//! The group lock is written once against [`RawLock`]; which implementation
//! backs a given role is chosen when the group lock is built.
//!
//! # Ownership
//!
//! A [`RawLock`] has no owner. `release` may be called from a different
//! thread than the one that called `acquire`, which is what the resource
//! lock needs: the first member of a category acquires it and the last
//! member to leave releases it.
//!
//! # Blocking
//!
//! Waiters sleep on a [`std::sync::Condvar`]; nothing spins.
//!
//! | Primitive           | Wake order               | Used for                    |
//! |---------------------|--------------------------|-----------------------------|
//! | [`BinarySemaphore`] | whoever wins the race    | resource lock, barging gate |
//! | [`TicketLock`]      | strict arrival order     | FIFO turnstile              |

mod semaphore;
mod ticket;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub use semaphore::BinarySemaphore;
pub use ticket::TicketLock;

/// Binary exclusive lock with explicit acquire/release.
///
/// Construction is `create` and `Drop` is `destroy`.
pub trait RawLock: Send + Sync + fmt::Debug {
    /// Block until the lock is free, then take it.
    fn acquire(&self);

    /// Take the lock if it is free right now.
    fn try_acquire(&self) -> bool;

    /// Return the lock. Calling this on a free lock is a caller bug.
    fn release(&self);

    /// Whether some caller currently holds the lock.
    fn is_locked(&self) -> bool;

    /// Number of callers currently blocked in [`RawLock::acquire`].
    fn waiters(&self) -> usize;
}

/// Lock a state mutex, recovering the data if a previous holder panicked.
///
/// The guarded state is plain counters that are never left half-updated,
/// so a poisoned mutex still holds consistent data.
pub(crate) fn lock_state<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
