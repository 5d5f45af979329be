//! Participant identities and their pre-drawn timing plans.

use crate::config::SimConfig;
use crate::gate::Category;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identity of one participant. Ids are unique across both categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId {
    pub category: Category,
    pub id: usize,
}

impl ActorId {
    pub fn new(category: Category, id: usize) -> Self {
        Self { category, id }
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.category, self.id)
    }
}

/// What one participant will do: when it arrives and how long it stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantPlan {
    pub actor: ActorId,
    pub arrival_delay: Duration,
    pub usage: Duration,
}

/// Creation order of the population: alternating A, B, A, B, ... with the
/// surplus of the larger category at the end.
pub fn creation_order(participants_a: usize, participants_b: usize) -> Vec<Category> {
    let mut order = Vec::with_capacity(participants_a + participants_b);
    for i in 0..participants_a.max(participants_b) {
        if i < participants_a {
            order.push(Category::A);
        }
        if i < participants_b {
            order.push(Category::B);
        }
    }
    order
}

/// Draw every participant's plan up front.
///
/// With a seed the plans are reproducible; ids follow creation order.
pub fn plan_participants(config: &SimConfig) -> Vec<ParticipantPlan> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    creation_order(config.participants_a, config.participants_b)
        .into_iter()
        .enumerate()
        .map(|(id, category)| {
            let arrival_ms = if config.max_arrival_delay_ms == 0 {
                0
            } else {
                rng.gen_range(0..config.max_arrival_delay_ms)
            };
            let usage_ms = rng.gen_range(config.usage_min_ms..=config.usage_max_ms);

            ParticipantPlan {
                actor: ActorId::new(category, id),
                arrival_delay: Duration::from_millis(arrival_ms),
                usage: Duration::from_millis(usage_ms),
            }
        })
        .collect()
}
