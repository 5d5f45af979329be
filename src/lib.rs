//! Fairgate: fair group mutual exclusion for two categories of threads.
//!
//! Threads of the same category may hold a shared resource together; threads
//! of different categories never overlap. A turnstile in front of both
//! categories keeps either side from starving the other.
//!
//! - [`gate`]: the group lock itself ([`gate::GroupLock`]).
//! - [`primitives`]: the blocking locks it is built from.
//! - [`sim`]: a participant driver, trace recording and offline verification.
//! - [`config`]: YAML configuration for simulation runs.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod gate;
pub mod logging;
pub mod primitives;
pub mod sim;

#[cfg(test)]
mod test_support;
