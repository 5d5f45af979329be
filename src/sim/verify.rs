//! Offline checks over a recorded trace.

use super::actor::ActorId;
use super::trace::{TraceEvent, TraceKind};
use crate::gate::Category;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A property the trace fails to satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "violation")]
pub enum Violation {
    /// `actor` started using the resource while members of the other
    /// category were still using it.
    Overlap {
        seq: u64,
        actor: ActorId,
        in_use: usize,
    },
    /// A step arrived out of order for `actor`.
    OutOfOrder {
        seq: u64,
        actor: ActorId,
        expected: Option<TraceKind>,
        found: TraceKind,
    },
    /// `actor` never reached `finished`.
    Incomplete {
        actor: ActorId,
        last: TraceKind,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Overlap { seq, actor, in_use } => write!(
                f,
                "seq {}: {} entered while {} member(s) of {} were using the resource",
                seq,
                actor,
                in_use,
                actor.category.opposite()
            ),
            Violation::OutOfOrder {
                seq,
                actor,
                expected,
                found,
            } => match expected {
                Some(expected) => write!(
                    f,
                    "seq {}: {} recorded '{}' but '{}' was expected",
                    seq, actor, found, expected
                ),
                None => write!(
                    f,
                    "seq {}: {} recorded '{}' after finishing",
                    seq, actor, found
                ),
            },
            Violation::Incomplete { actor, last } => {
                write!(f, "{} stopped after '{}'", actor, last)
            }
        }
    }
}

/// Per-category figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub actors: usize,
    pub completed: usize,
    /// Largest number of members using the resource at once.
    pub peak_concurrency: usize,
}

/// Result of checking a trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub events: usize,
    pub a: CategoryStats,
    pub b: CategoryStats,
    /// Times the resource passed from one category to the other.
    pub handoffs: usize,
    /// Most admissions of the other category that any single actor saw
    /// between requesting and entering.
    pub max_bypass: usize,
    pub violations: Vec<Violation>,
}

impl TraceReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn stats(&self, category: Category) -> &CategoryStats {
        match category {
            Category::A => &self.a,
            Category::B => &self.b,
        }
    }

    fn stats_mut(&mut self, category: Category) -> &mut CategoryStats {
        match category {
            Category::A => &mut self.a,
            Category::B => &mut self.b,
        }
    }

    pub fn actors(&self) -> usize {
        self.a.actors + self.b.actors
    }

    pub fn completed(&self) -> usize {
        self.a.completed + self.b.completed
    }
}

#[derive(Debug)]
struct ActorProgress {
    last: TraceKind,
    /// Opposite-category admissions seen while waiting.
    bypassed_by: usize,
}

/// Replay a trace and check it.
///
/// Checks that every actor goes requested → entered → exited → finished
/// exactly once, and that no actor enters while the other category is
/// between `entered` and `exited`. Events are replayed in `seq` order.
pub fn verify_trace(events: &[TraceEvent]) -> TraceReport {
    let mut ordered: Vec<&TraceEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.seq);

    let mut report = TraceReport {
        events: events.len(),
        ..TraceReport::default()
    };
    let mut progress: BTreeMap<ActorId, ActorProgress> = BTreeMap::new();
    let mut in_use: BTreeMap<Category, usize> = BTreeMap::new();
    let mut last_admitted: Option<Category> = None;

    for event in ordered {
        let actor = event.actor;
        let expected = match progress.get(&actor) {
            Some(state) => state.last.next(),
            None => Some(TraceKind::Requested),
        };
        if expected != Some(event.kind) {
            report.violations.push(Violation::OutOfOrder {
                seq: event.seq,
                actor,
                expected,
                found: event.kind,
            });
            continue;
        }

        match event.kind {
            TraceKind::Requested => {
                report.stats_mut(actor.category).actors += 1;
                progress.insert(
                    actor,
                    ActorProgress {
                        last: TraceKind::Requested,
                        bypassed_by: 0,
                    },
                );
                continue;
            }
            TraceKind::Entered => {
                let category = actor.category;
                let others = in_use.get(&category.opposite()).copied().unwrap_or(0);
                if others > 0 {
                    report.violations.push(Violation::Overlap {
                        seq: event.seq,
                        actor,
                        in_use: others,
                    });
                }

                let members = in_use.entry(category).or_insert(0);
                *members += 1;
                let members = *members;
                let stats = report.stats_mut(category);
                stats.peak_concurrency = stats.peak_concurrency.max(members);

                if last_admitted.is_some_and(|previous| previous != category) {
                    report.handoffs += 1;
                }
                last_admitted = Some(category);

                for (waiting, state) in progress.iter_mut() {
                    if waiting.category != category && state.last == TraceKind::Requested {
                        state.bypassed_by += 1;
                    }
                }
                if let Some(state) = progress.get(&actor) {
                    report.max_bypass = report.max_bypass.max(state.bypassed_by);
                }
            }
            TraceKind::Exited => {
                if let Some(members) = in_use.get_mut(&actor.category) {
                    *members = members.saturating_sub(1);
                }
            }
            TraceKind::Finished => {
                report.stats_mut(actor.category).completed += 1;
            }
        }

        if let Some(state) = progress.get_mut(&actor) {
            state.last = event.kind;
        }
    }

    for (actor, state) in &progress {
        if state.last != TraceKind::Finished {
            report.violations.push(Violation::Incomplete {
                actor: *actor,
                last: state.last,
            });
        }
    }

    report
}
