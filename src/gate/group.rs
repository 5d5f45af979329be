//! The assembled group lock and its RAII access guard.

use super::{
    Admission, Category, CategoryGate, Occupancy, ResourceLock, Turnstile, TurnstilePolicy,
};

/// Group mutual exclusion between categories A and B.
///
/// Members of one category may hold the resource together; members of
/// different categories never do. All arrivals funnel through one turnstile,
/// which keeps a steady stream of one category from locking the other out.
///
/// Lock order is fixed: turnstile, then the caller's own counter lock, then
/// the resource. `exit` takes only the counter lock.
#[derive(Debug)]
pub struct GroupLock {
    turnstile: Turnstile,
    resource: ResourceLock,
    gate_a: CategoryGate,
    gate_b: CategoryGate,
}

impl GroupLock {
    pub fn new(policy: TurnstilePolicy) -> Self {
        Self {
            turnstile: Turnstile::new(policy),
            resource: ResourceLock::new(),
            gate_a: CategoryGate::new(Category::A),
            gate_b: CategoryGate::new(Category::B),
        }
    }

    pub fn policy(&self) -> TurnstilePolicy {
        self.turnstile.policy()
    }

    fn gate(&self, category: Category) -> &CategoryGate {
        match category {
            Category::A => &self.gate_a,
            Category::B => &self.gate_b,
        }
    }

    /// Block until `category` may use the resource, then join it.
    pub fn enter(&self, category: Category) -> Admission {
        let admission = self.gate(category).enter(&self.turnstile, &self.resource);
        debug_assert_eq!(
            self.gate(category.opposite()).active(),
            0,
            "{} admitted while {} is active",
            category,
            category.opposite()
        );
        admission
    }

    /// Leave the resource. Returns the members of `category` still active.
    ///
    /// Must follow exactly one [`GroupLock::enter`] for the same category by
    /// the same actor. An unmatched exit corrupts the count; debug builds
    /// assert on it.
    pub fn exit(&self, category: Category) -> usize {
        self.gate(category).exit(&self.resource)
    }

    pub fn enter_category_a(&self) {
        self.enter(Category::A);
    }

    pub fn exit_category_a(&self) {
        self.exit(Category::A);
    }

    pub fn enter_category_b(&self) {
        self.enter(Category::B);
    }

    pub fn exit_category_b(&self) {
        self.exit(Category::B);
    }

    /// Enter and return a guard that exits when dropped.
    pub fn access(&self, category: Category) -> GroupAccess<'_> {
        let admission = self.enter(category);
        GroupAccess {
            group: self,
            admission,
            released: false,
        }
    }

    pub fn active_count(&self, category: Category) -> usize {
        self.gate(category).active()
    }

    /// Arrivals currently holding or waiting for the turnstile.
    pub fn turnstile_queue(&self) -> usize {
        self.turnstile.queued()
    }

    /// Both counter locks held at once, so neither category is mid-switch.
    /// `None` if either lock is busy.
    #[cfg(test)]
    pub(crate) fn settled_view(&self) -> Option<SettledView> {
        let _counter_a = self.gate_a.try_hold_counter()?;
        let _counter_b = self.gate_b.try_hold_counter()?;
        Some(SettledView {
            holder: self.resource.holder(),
            resource_held: self.resource.is_held(),
            active_a: self.gate_a.active(),
            active_b: self.gate_b.active(),
        })
    }

    /// Current occupancy, exact whenever no category switch is in flight.
    pub fn occupancy(&self) -> Occupancy {
        match self.resource.holder() {
            Some(category) => match self.active_count(category) {
                0 => Occupancy::Idle,
                members => Occupancy::Active { category, members },
            },
            None => Occupancy::Idle,
        }
    }

    /// No members active, resource free, nobody at the turnstile.
    pub fn is_quiescent(&self) -> bool {
        self.gate_a.active() == 0
            && self.gate_b.active() == 0
            && !self.resource.is_held()
            && self.resource.holder().is_none()
            && !self.turnstile.is_held()
    }
}

/// Lock state sampled with no category switch in flight.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SettledView {
    pub holder: Option<Category>,
    pub resource_held: bool,
    pub active_a: usize,
    pub active_b: usize,
}

impl Default for GroupLock {
    fn default() -> Self {
        Self::new(TurnstilePolicy::default())
    }
}

/// RAII membership in the active category.
///
/// Dropping the guard performs the matching exit, so an enter can never be
/// left unpaired by a guard holder.
#[must_use = "dropping the guard exits immediately"]
#[derive(Debug)]
pub struct GroupAccess<'a> {
    group: &'a GroupLock,
    admission: Admission,
    released: bool,
}

impl GroupAccess<'_> {
    pub fn category(&self) -> Category {
        self.admission.category
    }

    pub fn admission(&self) -> Admission {
        self.admission
    }

    /// Exit now. Returns the members of the category still active.
    pub fn release(mut self) -> usize {
        self.released = true;
        self.group.exit(self.admission.category)
    }
}

impl Drop for GroupAccess<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.group.exit(self.admission.category);
        }
    }
}
