//! Trace of a simulation run.
//!
//! Every participant step is recorded as a [`TraceEvent`] with a global
//! sequence number. Traces are stored as NDJSON (one JSON object per line)
//! so a run can be verified again later with `fairgate verify`.
//!
//! # Event Format
//!
//! - `seq`: position in the run, gap-free from 0
//! - `ts`: RFC3339 timestamp
//! - `actor`: `{"category": "a" | "b", "id": n}`
//! - `kind`: `requested`, `entered`, `exited` or `finished`
//! - `active`: members of the actor's category active at that point
//!   (`entered` and `finished` only)
//!
//! `entered` is recorded after the entry returns and `exited` before the
//! exit is issued, so the interval between them lies inside the actor's
//! admitted window.

use super::actor::ActorId;
use crate::config::CategoryLabels;
use crate::error::{FairgateError, Result};
use crate::primitives::lock_state;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// One step of a participant's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// About to call enter.
    Requested,
    /// Enter returned; the actor is using the resource.
    Entered,
    /// Done using the resource; about to call exit.
    Exited,
    /// Exit returned.
    Finished,
}

impl TraceKind {
    /// The step that must follow this one for the same actor.
    pub fn next(self) -> Option<TraceKind> {
        match self {
            TraceKind::Requested => Some(TraceKind::Entered),
            TraceKind::Entered => Some(TraceKind::Exited),
            TraceKind::Exited => Some(TraceKind::Finished),
            TraceKind::Finished => None,
        }
    }
}

impl std::fmt::Display for TraceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceKind::Requested => write!(f, "requested"),
            TraceKind::Entered => write!(f, "entered"),
            TraceKind::Exited => write!(f, "exited"),
            TraceKind::Finished => write!(f, "finished"),
        }
    }
}

/// A recorded participant step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub seq: u64,
    pub ts: DateTime<Utc>,
    pub actor: ActorId,
    pub kind: TraceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<usize>,
}

impl TraceEvent {
    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| FairgateError::TraceError(format!("failed to serialize event: {}", e)))
    }
}

/// Human-readable narration for an event, if that step is narrated.
pub fn narration_line(labels: &CategoryLabels, event: &TraceEvent) -> Option<String> {
    let category = event.actor.category;
    let name = format!("{} Thread {}", labels.label(category), event.actor.id);
    match event.kind {
        TraceKind::Requested => Some(format!("{} is requesting access.", name)),
        TraceKind::Entered => Some(format!(
            " -> {} is USING the resource. (Total {}: {})",
            name,
            labels.plural(category),
            event.active.unwrap_or_default()
        )),
        TraceKind::Exited => None,
        TraceKind::Finished => Some(format!("{} finished.", name)),
    }
}

/// Thread-safe, sequence-numbered event log shared by all participants.
#[derive(Debug, Default)]
pub struct TraceLog {
    events: Mutex<Vec<TraceEvent>>,
    narration: Option<CategoryLabels>,
}

impl TraceLog {
    /// A log that records silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that also prints each narrated step to stdout.
    pub fn narrated(labels: CategoryLabels) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            narration: Some(labels),
        }
    }

    /// Append a step and return its sequence number.
    ///
    /// Narration is printed while the log is locked, so stdout order
    /// matches sequence order.
    pub fn record(&self, actor: ActorId, kind: TraceKind, active: Option<usize>) -> u64 {
        let mut events = lock_state(&self.events);
        let seq = events.len() as u64;
        let event = TraceEvent {
            seq,
            ts: Utc::now(),
            actor,
            kind,
            active,
        };
        if let Some(labels) = &self.narration
            && let Some(line) = narration_line(labels, &event)
        {
            println!("{}", line);
        }
        events.push(event);
        seq
    }

    pub fn len(&self) -> usize {
        lock_state(&self.events).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Write a trace as NDJSON, replacing any existing file.
pub fn write_ndjson(path: &Path, events: &[TraceEvent]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            FairgateError::TraceError(format!(
                "failed to create trace directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        FairgateError::TraceError(format!(
            "failed to create trace file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    for event in events {
        let line = event.to_ndjson_line()?;
        writeln!(writer, "{}", line).map_err(|e| {
            FairgateError::TraceError(format!(
                "failed to write trace to '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    writer.flush().map_err(|e| {
        FairgateError::TraceError(format!(
            "failed to flush trace file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Read an NDJSON trace. Blank lines are skipped.
pub fn read_ndjson(path: &Path) -> Result<Vec<TraceEvent>> {
    let content = fs::read_to_string(path).map_err(|e| {
        FairgateError::TraceError(format!(
            "failed to read trace file '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| {
                FairgateError::TraceError(format!(
                    "invalid event on line {} of '{}': {}",
                    index + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
