//! SimConfig struct definition and default implementation.

use super::types::*;
use crate::gate::{Category, TurnstilePolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one simulation run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // =========================================================================
    // Population
    // =========================================================================
    /// Number of category A participants.
    #[serde(default = "default_participants")]
    pub participants_a: usize,

    /// Number of category B participants.
    #[serde(default = "default_participants")]
    pub participants_b: usize,

    /// Names used for the categories in narration.
    #[serde(default)]
    pub labels: CategoryLabels,

    // =========================================================================
    // Timing
    // =========================================================================
    /// Upper bound (exclusive) of the random delay before a participant
    /// requests access. Zero means every participant arrives at once.
    #[serde(default = "default_max_arrival_delay_ms")]
    pub max_arrival_delay_ms: u64,

    /// Shortest simulated use of the resource.
    #[serde(default = "default_usage_min_ms")]
    pub usage_min_ms: u64,

    /// Longest simulated use of the resource. Equal to `usage_min_ms` for a
    /// fixed duration.
    #[serde(default = "default_usage_max_ms")]
    pub usage_max_ms: u64,

    /// Seed for arrival and usage durations. Drawn from entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    // =========================================================================
    // Coordination
    // =========================================================================
    /// Ordering policy of the shared turnstile.
    #[serde(default)]
    pub turnstile: TurnstilePolicy,

    // =========================================================================
    // Output
    // =========================================================================
    /// Where to write the NDJSON trace of the run, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_path: Option<PathBuf>,

    /// Whether to narrate each step on stdout.
    #[serde(default = "default_true")]
    pub echo: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            participants_a: default_participants(),
            participants_b: default_participants(),
            labels: CategoryLabels::default(),
            max_arrival_delay_ms: default_max_arrival_delay_ms(),
            usage_min_ms: default_usage_min_ms(),
            usage_max_ms: default_usage_max_ms(),
            seed: None,
            turnstile: TurnstilePolicy::default(),
            trace_path: None,
            echo: default_true(),
        }
    }
}

impl SimConfig {
    pub fn participants(&self, category: Category) -> usize {
        match category {
            Category::A => self.participants_a,
            Category::B => self.participants_b,
        }
    }

    /// Both populations together. Saturates instead of overflowing so that
    /// `validate` can reject absurd counts.
    pub fn total_participants(&self) -> usize {
        self.participants_a.saturating_add(self.participants_b)
    }
}
