//! Participant driver around the group lock.
//!
//! Each participant runs on its own OS thread and goes through one cycle:
//! wait a random arrival delay, request access, use the resource for a
//! while, leave. Every step is recorded in a [`TraceLog`], which can be
//! written as NDJSON and checked with [`verify_trace`].
//!
//! Two drivers are provided:
//! - [`run_simulation`]: a mixed population of both categories with random
//!   timing, as described by a [`crate::config::SimConfig`].
//! - [`run_long_holder`]: one long-lived A, a queue of B waiters, then a
//!   second wave of A. Checks that the waiters are not overtaken.

mod actor;
mod runner;
mod scenario;
mod trace;
mod verify;

#[cfg(test)]
mod tests;

// Re-export public API
pub use actor::{ActorId, ParticipantPlan, creation_order, plan_participants};
pub use runner::{RunReport, run_participant, run_simulation};
pub use scenario::{LongHolderParams, LongHolderReport, run_long_holder};
pub use trace::{
    TraceEvent, TraceKind, TraceLog, narration_line, read_ndjson, write_ndjson,
};
pub use verify::{CategoryStats, TraceReport, Violation, verify_trace};
