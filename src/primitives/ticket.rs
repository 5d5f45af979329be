//! FIFO ticket lock.
//!
//! Every caller of [`RawLock::acquire`] draws the next ticket and sleeps until
//! `now_serving` reaches it. Release advances `now_serving` by one, so the
//! lock is granted in exactly the order tickets were drawn.

use super::{RawLock, lock_state};
use std::sync::{Condvar, Mutex, PoisonError};

#[derive(Debug, Default)]
struct TicketState {
    next_ticket: u64,
    now_serving: u64,
}

impl TicketState {
    /// Tickets drawn and not yet returned, including the holder's.
    fn outstanding(&self) -> u64 {
        self.next_ticket - self.now_serving
    }
}

/// A strictly first-come-first-served exclusive lock.
#[derive(Debug, Default)]
pub struct TicketLock {
    state: Mutex<TicketState>,
    turn: Condvar,
}

impl TicketLock {
    /// Create a free ticket lock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawLock for TicketLock {
    fn acquire(&self) {
        let mut state = lock_state(&self.state);
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        while state.now_serving != ticket {
            state = self.turn.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn try_acquire(&self) -> bool {
        let mut state = lock_state(&self.state);
        if state.outstanding() != 0 {
            return false;
        }
        state.next_ticket += 1;
        true
    }

    fn release(&self) {
        let mut state = lock_state(&self.state);
        debug_assert!(state.outstanding() > 0, "release of a free TicketLock");
        state.now_serving += 1;
        drop(state);
        // Sleepers hold different tickets; only the next one may proceed.
        self.turn.notify_all();
    }

    fn is_locked(&self) -> bool {
        lock_state(&self.state).outstanding() > 0
    }

    fn waiters(&self) -> usize {
        let outstanding = lock_state(&self.state).outstanding();
        outstanding.saturating_sub(1) as usize
    }
}
