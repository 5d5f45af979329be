//! Explicit view of who is using the resource.

use super::Category;
use serde::Serialize;
use std::fmt;

/// System-wide occupancy of the resource.
///
/// `Active` always moves to `Idle` before it can become `Active` for the
/// other category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum Occupancy {
    Idle,
    Active { category: Category, members: usize },
}

impl Occupancy {
    pub fn is_idle(&self) -> bool {
        matches!(self, Occupancy::Idle)
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Occupancy::Idle => None,
            Occupancy::Active { category, .. } => Some(*category),
        }
    }

    pub fn members(&self) -> usize {
        match self {
            Occupancy::Idle => 0,
            Occupancy::Active { members, .. } => *members,
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupancy::Idle => write!(f, "idle"),
            Occupancy::Active { category, members } => {
                write!(f, "active({} x {})", category, members)
            }
        }
    }
}
