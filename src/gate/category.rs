//! The two actor categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two disjoint actor classes contending for the resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    A,
    B,
}

impl Category {
    /// Both categories, in a fixed order.
    pub const ALL: [Category; 2] = [Category::A, Category::B];

    /// The category that may never share the resource with this one.
    pub fn opposite(self) -> Self {
        match self {
            Category::A => Category::B,
            Category::B => Category::A,
        }
    }

    /// Lowercase identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::A => "a",
            Category::B => "b",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::A => write!(f, "A"),
            Category::B => write!(f, "B"),
        }
    }
}
