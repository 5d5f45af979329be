//! Spawns the participant threads and checks the run afterwards.

use super::actor::{ActorId, ParticipantPlan, plan_participants};
use super::trace::{TraceEvent, TraceKind, TraceLog, write_ndjson};
use super::verify::{TraceReport, verify_trace};
use crate::config::SimConfig;
use crate::error::{FairgateError, Result};
use crate::gate::{GroupLock, Occupancy};
use std::thread;
use std::time::{Duration, Instant};

/// One participant's full cycle: arrive, enter, use, exit.
///
/// Holds no coordination logic of its own; everything goes through `group`.
pub fn run_participant(group: &GroupLock, log: &TraceLog, plan: &ParticipantPlan) {
    let actor = plan.actor;
    thread::sleep(plan.arrival_delay);

    log.record(actor, TraceKind::Requested, None);
    let access = group.access(actor.category);
    log.record(
        actor,
        TraceKind::Entered,
        Some(group.active_count(actor.category)),
    );

    thread::sleep(plan.usage);

    log.record(actor, TraceKind::Exited, None);
    let remaining = access.release();
    log.record(actor, TraceKind::Finished, Some(remaining));
}

/// Everything known about a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub expected_actors: usize,
    pub events: Vec<TraceEvent>,
    pub trace: TraceReport,
    /// Occupancy after every participant was joined.
    pub final_occupancy: Occupancy,
    pub elapsed: Duration,
}

impl RunReport {
    /// Fail unless the trace is clean, every actor completed, and the group
    /// lock ended idle.
    pub fn check(&self) -> Result<()> {
        if !self.trace.is_clean() {
            let details: Vec<String> = self
                .trace
                .violations
                .iter()
                .map(|v| v.to_string())
                .collect();
            return Err(FairgateError::VerificationError(format!(
                "{} violation(s):\n  {}",
                details.len(),
                details.join("\n  ")
            )));
        }

        if self.trace.completed() != self.expected_actors {
            return Err(FairgateError::VerificationError(format!(
                "{} of {} participants completed",
                self.trace.completed(),
                self.expected_actors
            )));
        }

        if !self.final_occupancy.is_idle() {
            return Err(FairgateError::VerificationError(format!(
                "group lock ended {} instead of idle",
                self.final_occupancy
            )));
        }

        Ok(())
    }
}

/// Spawn one thread per participant, wait for all of them, then verify.
///
/// # Returns
///
/// * `Ok(RunReport)` - All participants were joined; call [`RunReport::check`]
/// * `Err(FairgateError::ConfigError)` - The config failed validation
/// * `Err(FairgateError::InitError)` - A participant thread could not be spawned
/// * `Err(FairgateError::ParticipantError)` - A participant thread panicked
/// * `Err(FairgateError::TraceError)` - The trace file could not be written
pub fn run_simulation(config: &SimConfig) -> Result<RunReport> {
    config.validate()?;

    let group = GroupLock::new(config.turnstile);
    let log = if config.echo {
        TraceLog::narrated(config.labels.clone())
    } else {
        TraceLog::new()
    };
    let plans = plan_participants(config);

    tracing::info!(
        participants_a = config.participants_a,
        participants_b = config.participants_b,
        turnstile = %config.turnstile,
        seed = ?config.seed,
        "starting simulation"
    );

    let started = Instant::now();
    spawn_and_join(&group, &log, &plans)?;
    let elapsed = started.elapsed();

    let final_occupancy = group.occupancy();
    let events = log.into_events();
    if let Some(path) = &config.trace_path {
        write_ndjson(path, &events)?;
        tracing::info!(path = %path.display(), events = events.len(), "trace written");
    }

    let trace = verify_trace(&events);
    tracing::info!(
        elapsed_ms = elapsed.as_millis() as u64,
        handoffs = trace.handoffs,
        max_bypass = trace.max_bypass,
        violations = trace.violations.len(),
        "simulation finished"
    );

    Ok(RunReport {
        expected_actors: plans.len(),
        events,
        trace,
        final_occupancy,
        elapsed,
    })
}

fn spawn_and_join(group: &GroupLock, log: &TraceLog, plans: &[ParticipantPlan]) -> Result<()> {
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(plans.len());
        let mut spawn_error = None;

        for plan in plans {
            let spawned = thread::Builder::new()
                .name(thread_name(plan.actor))
                .spawn_scoped(s, move || run_participant(group, log, plan));
            match spawned {
                Ok(handle) => handles.push((plan.actor, handle)),
                Err(e) => {
                    spawn_error = Some(FairgateError::InitError(format!(
                        "failed to spawn participant {}: {}",
                        plan.actor, e
                    )));
                    break;
                }
            }
        }

        // Join everything before reporting, so no panic is left unobserved.
        let panicked: Vec<ActorId> = handles
            .into_iter()
            .filter_map(|(actor, handle)| handle.join().err().map(|_| actor))
            .collect();

        if let Some(err) = spawn_error {
            return Err(err);
        }
        if !panicked.is_empty() {
            let names: Vec<String> = panicked.iter().map(|a| a.to_string()).collect();
            return Err(FairgateError::ParticipantError(format!(
                "participant(s) panicked: {}",
                names.join(", ")
            )));
        }
        Ok(())
    })
}

pub(crate) fn thread_name(actor: ActorId) -> String {
    format!("participant-{}-{}", actor.category.as_str(), actor.id)
}
