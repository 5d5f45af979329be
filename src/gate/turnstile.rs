//! The turnstile every arrival passes through, regardless of category.

use crate::primitives::{BinarySemaphore, RawLock, TicketLock};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the turnstile orders arrivals that contend for it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TurnstilePolicy {
    /// Strict arrival order. An opposite-category arrival holding a ticket
    /// can only be preceded by arrivals holding earlier tickets.
    #[default]
    Fifo,
    /// Plain exclusive lock; a woken waiter races with new arrivals.
    Barging,
}

impl fmt::Display for TurnstilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnstilePolicy::Fifo => write!(f, "fifo"),
            TurnstilePolicy::Barging => write!(f, "barging"),
        }
    }
}

/// A single shared exclusive token.
///
/// Not reentrant: a thread holding a [`TurnstilePass`] must not call
/// [`Turnstile::pass`] again before dropping it.
#[derive(Debug)]
pub struct Turnstile {
    raw: Box<dyn RawLock>,
    policy: TurnstilePolicy,
}

impl Turnstile {
    pub fn new(policy: TurnstilePolicy) -> Self {
        let raw: Box<dyn RawLock> = match policy {
            TurnstilePolicy::Fifo => Box::new(TicketLock::new()),
            TurnstilePolicy::Barging => Box::new(BinarySemaphore::new()),
        };
        Self { raw, policy }
    }

    pub fn policy(&self) -> TurnstilePolicy {
        self.policy
    }

    /// Block until the token is free and take it.
    ///
    /// The token is returned when the pass is dropped.
    pub fn pass(&self) -> TurnstilePass<'_> {
        self.raw.acquire();
        TurnstilePass { turnstile: self }
    }

    /// Arrivals currently at the turnstile: the holder plus everyone blocked.
    pub fn queued(&self) -> usize {
        self.raw.waiters() + usize::from(self.raw.is_locked())
    }

    pub fn is_held(&self) -> bool {
        self.raw.is_locked()
    }
}

/// Proof of holding the turnstile. Dropping it releases the token.
#[must_use = "dropping the pass releases the turnstile immediately"]
#[derive(Debug)]
pub struct TurnstilePass<'a> {
    turnstile: &'a Turnstile,
}

impl Drop for TurnstilePass<'_> {
    fn drop(&mut self) {
        self.turnstile.raw.release();
    }
}
