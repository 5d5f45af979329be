//! Per-category bookkeeping: the active count and the first-in/last-out rule.

use super::{Category, ResourceLock, Turnstile};
use crate::primitives::lock_state;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of one successful entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub category: Category,
    /// Whether this entry moved the category from idle to active and
    /// therefore acquired the resource.
    pub first: bool,
    /// Active members of the category right after this entry.
    pub active: usize,
}

/// Tracks the active members of one category.
///
/// `active` is written only while `counter` is held and only by members of
/// this category. It is published as an atomic so observers never queue
/// behind an entrant that is blocked on the resource.
#[derive(Debug)]
pub struct CategoryGate {
    category: Category,
    counter: Mutex<()>,
    active: AtomicUsize,
}

impl CategoryGate {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            counter: Mutex::new(()),
            active: AtomicUsize::new(0),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Hold the counter lock if nobody else does. While held, this category
    /// cannot be in the middle of a switch.
    #[cfg(test)]
    pub(crate) fn try_hold_counter(&self) -> Option<std::sync::MutexGuard<'_, ()>> {
        self.counter.try_lock().ok()
    }

    /// Pass the turnstile and join the category, claiming the resource if
    /// this is the first active member.
    ///
    /// The first entrant blocks on the resource while still holding the
    /// turnstile, so no later arrival of either category gets past the
    /// turnstile until the category switch has happened.
    pub fn enter(&self, turnstile: &Turnstile, resource: &ResourceLock) -> Admission {
        let _pass = turnstile.pass();
        let _counter = lock_state(&self.counter);

        let before = self.active.load(Ordering::SeqCst);
        let first = before == 0;
        if first {
            resource.acquire(self.category);
            tracing::debug!(category = %self.category, "first entrant claimed the resource");
        }
        // Published only once the resource is held.
        let active = before + 1;
        self.active.store(active, Ordering::SeqCst);
        tracing::trace!(category = %self.category, active, "entered");

        Admission {
            category: self.category,
            first,
            active,
        }
    }

    /// Leave the category, releasing the resource if this was the last
    /// active member. Returns the members still active.
    ///
    /// Must be paired with exactly one earlier [`CategoryGate::enter`] by the
    /// same logical actor. Never touches the turnstile.
    pub fn exit(&self, resource: &ResourceLock) -> usize {
        let _counter = lock_state(&self.counter);

        let before = self.active.load(Ordering::SeqCst);
        debug_assert!(before > 0, "{} exit without a matching enter", self.category);
        let remaining = before - 1;
        // Published before the resource is handed back.
        self.active.store(remaining, Ordering::SeqCst);
        tracing::trace!(category = %self.category, active = remaining, "exited");

        if remaining == 0 {
            resource.release(self.category);
            tracing::debug!(category = %self.category, "last member released the resource");
        }
        remaining
    }
}
