//! Binary semaphore built from a mutex and a condition variable.

use super::{RawLock, lock_state};
use std::sync::{Condvar, Mutex, PoisonError};

#[derive(Debug, Default)]
struct SemaphoreState {
    locked: bool,
    waiters: usize,
}

/// A binary semaphore: one permit, releasable from any thread.
///
/// On release a single sleeper is woken, but a thread arriving at that
/// moment may take the permit first. No arrival order is preserved.
#[derive(Debug, Default)]
pub struct BinarySemaphore {
    state: Mutex<SemaphoreState>,
    available: Condvar,
}

impl BinarySemaphore {
    /// Create a free semaphore.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawLock for BinarySemaphore {
    fn acquire(&self) {
        let mut state = lock_state(&self.state);
        state.waiters += 1;
        while state.locked {
            state = self
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.waiters -= 1;
        state.locked = true;
    }

    fn try_acquire(&self) -> bool {
        let mut state = lock_state(&self.state);
        if state.locked {
            return false;
        }
        state.locked = true;
        true
    }

    fn release(&self) {
        let mut state = lock_state(&self.state);
        debug_assert!(state.locked, "release of a free BinarySemaphore");
        state.locked = false;
        drop(state);
        self.available.notify_one();
    }

    fn is_locked(&self) -> bool {
        lock_state(&self.state).locked
    }

    fn waiters(&self) -> usize {
        lock_state(&self.state).waiters
    }
}
