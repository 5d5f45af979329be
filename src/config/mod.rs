//! Configuration model for simulation runs.
//!
//! This module defines [`SimConfig`], the YAML document that describes one
//! run of the participant driver. It supports forward-compatible YAML parsing
//! (unknown fields are ignored), sensible defaults for every field, and
//! validation of config values. CLI flags are applied on top afterwards.
//!
//! The group lock itself has no configuration beyond its turnstile policy.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::SimConfig;
pub use types::{CategoryLabels, MAX_PARTICIPANTS_PER_CATEGORY};
