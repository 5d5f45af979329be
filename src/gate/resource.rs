//! The exclusive lock over the shared resource, held per category.

use super::Category;
use crate::primitives::{BinarySemaphore, RawLock, lock_state};
use std::sync::Mutex;

/// Binary lock held, as a unit, by whichever category has active members.
///
/// No individual actor owns it: the first entrant of a category acquires it
/// and the last member to leave releases it. The holding category is
/// recorded right after acquisition and cleared right before release.
#[derive(Debug, Default)]
pub struct ResourceLock {
    raw: BinarySemaphore,
    holder: Mutex<Option<Category>>,
}

impl ResourceLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the resource is free, then claim it for `category`.
    pub(crate) fn acquire(&self, category: Category) {
        self.raw.acquire();
        let previous = lock_state(&self.holder).replace(category);
        debug_assert!(
            previous.is_none(),
            "resource acquired for {} while recorded as held by {:?}",
            category,
            previous
        );
    }

    /// Return the resource on behalf of `category`.
    pub(crate) fn release(&self, category: Category) {
        let previous = lock_state(&self.holder).take();
        debug_assert_eq!(
            previous,
            Some(category),
            "resource released by a category that does not hold it"
        );
        self.raw.release();
    }

    /// The category currently holding the resource, if any.
    pub fn holder(&self) -> Option<Category> {
        *lock_state(&self.holder)
    }

    pub fn is_held(&self) -> bool {
        self.raw.is_locked()
    }
}
