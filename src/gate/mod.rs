//! Turnstile-based group mutual exclusion.
//!
//! Two categories of threads contend for one resource. Threads of the same
//! category may use it together; threads of different categories never
//! overlap. The pieces:
//!
//! - [`ResourceLock`]: binary lock over the resource, held by a whole
//!   category. Acquired by the category's first entrant, released by its
//!   last leaver.
//! - [`CategoryGate`]: one per category. Counts active members under a
//!   private counter lock and applies the first-in/last-out rule.
//! - [`Turnstile`]: one token every arrival must hold around its counter
//!   update. A category's first entrant waits for the resource while still
//!   holding it, so once an arrival of the other category is queued, new
//!   arrivals of the active category stop getting in.
//! - [`GroupLock`]: the assembled system and its entry points.
//!
//! # Flow
//!
//! ```text
//! enter:  turnstile.acquire -> counter.lock -> [first? resource.acquire]
//!         -> active += 1 -> counter.unlock -> turnstile.release
//! exit:   counter.lock -> active -= 1 -> [last? resource.release]
//!         -> counter.unlock
//! ```
//!
//! # Occupancy
//!
//! ```text
//! Idle --A enter--> Active(A, 1) --A enter--> Active(A, n+1)
//! Active(A, 1) --A exit--> Idle          (symmetric for B)
//! ```
//!
//! There is no direct `Active(A, _) -> Active(B, _)` transition.
//!
//! # Example
//!
//! ```
//! use fairgate::gate::{Category, GroupLock};
//!
//! let group = GroupLock::default();
//! let first = group.access(Category::A);
//! let second = group.access(Category::A);
//! assert_eq!(group.active_count(Category::A), 2);
//! drop((first, second));
//! assert!(group.occupancy().is_idle());
//! ```

mod category;
mod category_gate;
mod group;
mod occupancy;
mod resource;
mod turnstile;


pub use category::Category;
pub use category_gate::{Admission, CategoryGate};
pub use group::{GroupAccess, GroupLock};
pub use occupancy::Occupancy;
pub use resource::ResourceLock;
pub use turnstile::{Turnstile, TurnstilePass, TurnstilePolicy};
