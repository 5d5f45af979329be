//! Supporting types and default values for the run configuration.

use crate::gate::Category;
use serde::{Deserialize, Serialize};

/// Display names for the two categories in narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLabels {
    pub a: String,
    pub b: String,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            a: "White".to_string(),
            b: "Black".to_string(),
        }
    }
}

impl CategoryLabels {
    pub fn label(&self, category: Category) -> &str {
        match category {
            Category::A => &self.a,
            Category::B => &self.b,
        }
    }

    /// Plural form used in occupancy counts ("Total Whites: 2").
    pub fn plural(&self, category: Category) -> String {
        format!("{}s", self.label(category))
    }
}

/// Largest population accepted per category. Each participant is an OS thread.
pub const MAX_PARTICIPANTS_PER_CATEGORY: usize = 10_000;

// Default value functions for serde
pub(crate) fn default_participants() -> usize {
    5
}
pub(crate) fn default_max_arrival_delay_ms() -> u64 {
    100
}
pub(crate) fn default_usage_min_ms() -> u64 {
    200
}
pub(crate) fn default_usage_max_ms() -> u64 {
    500
}
pub(crate) fn default_true() -> bool {
    true
}
