//! The long-holder fairness scenario.
//!
//! One A holds the resource while B waiters queue at the turnstile, then a
//! second wave of A arrives behind them. When the holder leaves, every B
//! waiter should be admitted before any of the late A.

use super::actor::{ActorId, ParticipantPlan};
use super::runner::{run_participant, thread_name};
use super::trace::{TraceEvent, TraceKind, TraceLog};
use super::verify::{TraceReport, verify_trace};
use crate::config::CategoryLabels;
use crate::error::{FairgateError, Result};
use crate::gate::{Category, GroupLock, TurnstilePolicy};
use std::thread;
use std::time::{Duration, Instant};

/// How long to wait for an arrival to show up at the turnstile.
const QUEUE_PATIENCE: Duration = Duration::from_secs(5);

/// Parameters of the long-holder scenario.
#[derive(Debug, Clone)]
pub struct LongHolderParams {
    /// How long the single A holds the resource.
    pub hold: Duration,
    /// B actors that queue while A holds the resource.
    pub waiters: usize,
    /// A actors that arrive after every B waiter has queued.
    pub late: usize,
    /// How long each queued actor uses the resource once admitted.
    pub usage: Duration,
    pub turnstile: TurnstilePolicy,
    pub labels: CategoryLabels,
    pub echo: bool,
}

impl Default for LongHolderParams {
    fn default() -> Self {
        Self {
            hold: Duration::from_millis(500),
            waiters: 3,
            late: 3,
            usage: Duration::from_millis(50),
            turnstile: TurnstilePolicy::default(),
            labels: CategoryLabels::default(),
            echo: true,
        }
    }
}

/// Outcome of the long-holder scenario.
#[derive(Debug, Clone)]
pub struct LongHolderReport {
    pub waiters: usize,
    /// Admissions after the holder, in order.
    pub admission_order: Vec<ActorId>,
    pub events: Vec<TraceEvent>,
    pub trace: TraceReport,
}

impl LongHolderReport {
    /// Whether every B waiter was admitted before any late A.
    pub fn waiters_admitted_first(&self) -> bool {
        self.admission_order
            .iter()
            .take(self.waiters)
            .all(|actor| actor.category == Category::B)
    }

    /// Fail unless the trace is clean and the waiters went first.
    pub fn check(&self) -> Result<()> {
        if !self.trace.is_clean() {
            let details: Vec<String> = self
                .trace
                .violations
                .iter()
                .map(|v| v.to_string())
                .collect();
            return Err(FairgateError::VerificationError(details.join("; ")));
        }
        if !self.waiters_admitted_first() {
            let order: Vec<String> = self
                .admission_order
                .iter()
                .map(|a| a.to_string())
                .collect();
            return Err(FairgateError::VerificationError(format!(
                "a late arrival overtook a queued waiter: {}",
                order.join(", ")
            )));
        }
        Ok(())
    }
}

/// Block until `expected` arrivals are holding or waiting at the turnstile.
fn await_queue(group: &GroupLock, expected: usize, who: ActorId) -> Result<()> {
    let deadline = Instant::now() + QUEUE_PATIENCE;
    while group.turnstile_queue() < expected {
        if Instant::now() > deadline {
            return Err(FairgateError::ParticipantError(format!(
                "{} never reached the turnstile",
                who
            )));
        }
        thread::sleep(Duration::from_millis(1));
    }
    Ok(())
}

/// Run the long-holder scenario.
pub fn run_long_holder(params: &LongHolderParams) -> Result<LongHolderReport> {
    let group = GroupLock::new(params.turnstile);
    let log = if params.echo {
        TraceLog::narrated(params.labels.clone())
    } else {
        TraceLog::new()
    };

    let holder = ActorId::new(Category::A, 0);
    let queued: Vec<ParticipantPlan> = (1..=params.waiters)
        .map(|id| (Category::B, id))
        .chain((params.waiters + 1..=params.waiters + params.late).map(|id| (Category::A, id)))
        .map(|(category, id)| ParticipantPlan {
            actor: ActorId::new(category, id),
            arrival_delay: Duration::ZERO,
            usage: params.usage,
        })
        .collect();

    tracing::info!(
        waiters = params.waiters,
        late = params.late,
        turnstile = %params.turnstile,
        "starting long-holder scenario"
    );

    log.record(holder, TraceKind::Requested, None);
    let access = group.access(Category::A);
    let held_since = Instant::now();
    log.record(
        holder,
        TraceKind::Entered,
        Some(group.active_count(Category::A)),
    );

    let outcome = thread::scope(|s| {
        let group = &group;
        let log = &log;
        let mut handles = Vec::with_capacity(queued.len());
        let mut staged = Ok(());

        for (position, plan) in queued.iter().enumerate() {
            let spawned = thread::Builder::new()
                .name(thread_name(plan.actor))
                .spawn_scoped(s, move || run_participant(group, log, plan));
            match spawned {
                Ok(handle) => handles.push((plan.actor, handle)),
                Err(e) => {
                    staged = Err(FairgateError::InitError(format!(
                        "failed to spawn participant {}: {}",
                        plan.actor, e
                    )));
                    break;
                }
            }
            // Each arrival takes the next place in line before the next one starts.
            if let Err(e) = await_queue(group, position + 1, plan.actor) {
                staged = Err(e);
                break;
            }
        }

        thread::sleep(params.hold.saturating_sub(held_since.elapsed()));
        log.record(holder, TraceKind::Exited, None);
        let remaining = access.release();
        log.record(holder, TraceKind::Finished, Some(remaining));

        let panicked: Vec<String> = handles
            .into_iter()
            .filter_map(|(actor, handle)| handle.join().err().map(|_| actor.to_string()))
            .collect();

        staged?;
        if !panicked.is_empty() {
            return Err(FairgateError::ParticipantError(format!(
                "participant(s) panicked: {}",
                panicked.join(", ")
            )));
        }
        Ok(())
    });
    outcome?;

    let events = log.into_events();
    let trace = verify_trace(&events);
    let admission_order = events
        .iter()
        .filter(|event| event.kind == TraceKind::Entered && event.actor != holder)
        .map(|event| event.actor)
        .collect();

    Ok(LongHolderReport {
        waiters: params.waiters,
        admission_order,
        events,
        trace,
    })
}
