//! Tests for the participant driver, traces, and verification.

use super::*;
use crate::config::{CategoryLabels, SimConfig};
use crate::error::FairgateError;
use crate::gate::{Category, TurnstilePolicy};
use crate::test_support::quick_config;
use chrono::Utc;
use serial_test::serial;
use std::time::Duration;
use tempfile::TempDir;

fn event(seq: u64, category: Category, id: usize, kind: TraceKind) -> TraceEvent {
    TraceEvent {
        seq,
        ts: Utc::now(),
        actor: ActorId::new(category, id),
        kind,
        active: None,
    }
}

/// Full cycle for one actor starting at `seq`.
fn cycle(seq: u64, category: Category, id: usize) -> Vec<TraceEvent> {
    [
        TraceKind::Requested,
        TraceKind::Entered,
        TraceKind::Exited,
        TraceKind::Finished,
    ]
    .into_iter()
    .enumerate()
    .map(|(offset, kind)| event(seq + offset as u64, category, id, kind))
    .collect()
}

// ============================================================================
// Trace recording
// ============================================================================

#[test]
fn test_trace_log_assigns_gap_free_sequence() {
    let log = TraceLog::new();
    let actor = ActorId::new(Category::A, 0);

    assert!(log.is_empty());
    assert_eq!(log.record(actor, TraceKind::Requested, None), 0);
    assert_eq!(log.record(actor, TraceKind::Entered, Some(1)), 1);
    assert_eq!(log.len(), 2);

    let events = log.into_events();
    assert_eq!(events[1].kind, TraceKind::Entered);
    assert_eq!(events[1].active, Some(1));
}

#[test]
fn test_narration_lines() {
    let labels = CategoryLabels::default();
    let mut entered = event(1, Category::A, 3, TraceKind::Entered);
    entered.active = Some(2);

    assert_eq!(
        narration_line(&labels, &event(0, Category::A, 3, TraceKind::Requested)).unwrap(),
        "White Thread 3 is requesting access."
    );
    assert_eq!(
        narration_line(&labels, &entered).unwrap(),
        " -> White Thread 3 is USING the resource. (Total Whites: 2)"
    );
    assert!(narration_line(&labels, &event(2, Category::B, 4, TraceKind::Exited)).is_none());
    assert_eq!(
        narration_line(&labels, &event(3, Category::B, 4, TraceKind::Finished)).unwrap(),
        "Black Thread 4 finished."
    );
}

#[test]
fn test_event_serialization_is_single_line_snake_case() {
    let line = event(5, Category::B, 2, TraceKind::Requested)
        .to_ndjson_line()
        .unwrap();

    assert!(!line.contains('\n'));
    assert!(line.contains("\"requested\""));
    assert!(line.contains("\"category\":\"b\""));
    // `active` is omitted when absent
    let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert!(parsed.get("active").is_none());
}

#[test]
fn test_ndjson_write_then_read() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("traces").join("run.ndjson");
    let mut events = cycle(0, Category::A, 0);
    events.extend(cycle(4, Category::B, 1));

    write_ndjson(&path, &events).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 8);

    assert_eq!(read_ndjson(&path).unwrap(), events);
}

#[test]
fn test_read_ndjson_reports_bad_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.ndjson");
    let good = event(0, Category::A, 0, TraceKind::Requested)
        .to_ndjson_line()
        .unwrap();
    std::fs::write(&path, format!("{}\n\nnot json\n", good)).unwrap();

    let err = read_ndjson(&path).unwrap_err();
    assert!(matches!(err, FairgateError::TraceError(_)));
    assert!(err.to_string().contains("line 3"));
}

// ============================================================================
// Verification
// ============================================================================

#[test]
fn test_verify_accepts_sequential_and_shared_usage() {
    // A0 and A1 overlap with each other, then B2 runs alone.
    let events = vec![
        event(0, Category::A, 0, TraceKind::Requested),
        event(1, Category::A, 1, TraceKind::Requested),
        event(2, Category::A, 0, TraceKind::Entered),
        event(3, Category::A, 1, TraceKind::Entered),
        event(4, Category::B, 2, TraceKind::Requested),
        event(5, Category::A, 0, TraceKind::Exited),
        event(6, Category::A, 1, TraceKind::Exited),
        event(7, Category::A, 0, TraceKind::Finished),
        event(8, Category::A, 1, TraceKind::Finished),
        event(9, Category::B, 2, TraceKind::Entered),
        event(10, Category::B, 2, TraceKind::Exited),
        event(11, Category::B, 2, TraceKind::Finished),
    ];

    let report = verify_trace(&events);
    assert!(report.is_clean(), "{:?}", report.violations);
    assert_eq!(report.events, 12);
    assert_eq!(report.actors(), 3);
    assert_eq!(report.completed(), 3);
    assert_eq!(report.stats(Category::A).peak_concurrency, 2);
    assert_eq!(report.stats(Category::B).peak_concurrency, 1);
    assert_eq!(report.handoffs, 1);
    assert_eq!(report.max_bypass, 0);
}

#[test]
fn test_verify_detects_cross_category_overlap() {
    let events = vec![
        event(0, Category::A, 0, TraceKind::Requested),
        event(1, Category::A, 0, TraceKind::Entered),
        event(2, Category::B, 1, TraceKind::Requested),
        event(3, Category::B, 1, TraceKind::Entered),
        event(4, Category::A, 0, TraceKind::Exited),
        event(5, Category::B, 1, TraceKind::Exited),
        event(6, Category::A, 0, TraceKind::Finished),
        event(7, Category::B, 1, TraceKind::Finished),
    ];

    let report = verify_trace(&events);
    assert_eq!(
        report.violations,
        vec![Violation::Overlap {
            seq: 3,
            actor: ActorId::new(Category::B, 1),
            in_use: 1,
        }]
    );
}

#[test]
fn test_verify_detects_out_of_order_and_incomplete_actors() {
    let events = vec![
        event(0, Category::A, 0, TraceKind::Entered),
        event(1, Category::B, 1, TraceKind::Requested),
        event(2, Category::B, 1, TraceKind::Entered),
    ];

    let report = verify_trace(&events);
    assert!(!report.is_clean());
    assert!(report.violations.iter().any(|v| matches!(
        v,
        Violation::OutOfOrder {
            seq: 0,
            expected: Some(TraceKind::Requested),
            found: TraceKind::Entered,
            ..
        }
    )));
    assert!(report.violations.contains(&Violation::Incomplete {
        actor: ActorId::new(Category::B, 1),
        last: TraceKind::Entered,
    }));
}

#[test]
fn test_verify_counts_bypass_of_waiting_actor() {
    // B1 requests, then two A admissions happen before B1 gets in.
    let events = vec![
        event(0, Category::B, 1, TraceKind::Requested),
        event(1, Category::A, 0, TraceKind::Requested),
        event(2, Category::A, 0, TraceKind::Entered),
        event(3, Category::A, 2, TraceKind::Requested),
        event(4, Category::A, 2, TraceKind::Entered),
        event(5, Category::A, 0, TraceKind::Exited),
        event(6, Category::A, 2, TraceKind::Exited),
        event(7, Category::B, 1, TraceKind::Entered),
        event(8, Category::A, 0, TraceKind::Finished),
        event(9, Category::A, 2, TraceKind::Finished),
        event(10, Category::B, 1, TraceKind::Exited),
        event(11, Category::B, 1, TraceKind::Finished),
    ];

    let report = verify_trace(&events);
    assert!(report.is_clean(), "{:?}", report.violations);
    assert_eq!(report.max_bypass, 2);
}

#[test]
fn test_verify_replays_in_sequence_order() {
    let mut events = cycle(0, Category::A, 0);
    events.reverse();

    assert!(verify_trace(&events).is_clean());
}

#[test]
fn test_violation_display() {
    let violation = Violation::Overlap {
        seq: 9,
        actor: ActorId::new(Category::A, 4),
        in_use: 2,
    };
    assert_eq!(
        violation.to_string(),
        "seq 9: A#4 entered while 2 member(s) of B were using the resource"
    );
}

// ============================================================================
// Simulation runs
// ============================================================================

#[test]
#[serial]
fn test_mixed_population_run_is_clean() {
    let report = run_simulation(&quick_config()).unwrap();

    assert!(report.check().is_ok(), "{:?}", report.trace.violations);
    assert_eq!(report.expected_actors, 10);
    assert_eq!(report.trace.completed(), 10);
    assert_eq!(report.trace.stats(Category::A).completed, 5);
    assert_eq!(report.trace.stats(Category::B).completed, 5);
    assert_eq!(report.events.len(), 40);
    assert!(report.final_occupancy.is_idle());
}

#[test]
#[serial]
fn test_simultaneous_arrivals_share_within_category() {
    let config = SimConfig {
        participants_a: 6,
        participants_b: 0,
        max_arrival_delay_ms: 0,
        usage_min_ms: 40,
        usage_max_ms: 40,
        ..quick_config()
    };

    let report = run_simulation(&config).unwrap();
    report.check().unwrap();
    assert!(report.trace.stats(Category::A).peak_concurrency > 1);
    assert_eq!(report.trace.handoffs, 0);
}

#[test]
#[serial]
fn test_barging_turnstile_still_excludes() {
    let config = SimConfig {
        turnstile: TurnstilePolicy::Barging,
        ..quick_config()
    };

    let report = run_simulation(&config).unwrap();
    report.check().unwrap();
}

#[test]
#[serial]
fn test_run_writes_trace_that_verifies_again() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("run.ndjson");
    let config = SimConfig {
        trace_path: Some(path.clone()),
        ..quick_config()
    };

    let report = run_simulation(&config).unwrap();
    let reread = read_ndjson(&path).unwrap();

    assert_eq!(reread, report.events);
    assert_eq!(verify_trace(&reread), report.trace);
}

#[test]
fn test_run_rejects_invalid_config() {
    let config = SimConfig {
        participants_a: 0,
        participants_b: 0,
        ..quick_config()
    };
    let err = run_simulation(&config).unwrap_err();
    assert!(matches!(err, FairgateError::ConfigError(_)));
}

#[test]
fn test_check_flags_missing_participants() {
    let report = RunReport {
        expected_actors: 2,
        events: cycle(0, Category::A, 0),
        trace: verify_trace(&cycle(0, Category::A, 0)),
        final_occupancy: crate::gate::Occupancy::Idle,
        elapsed: Duration::ZERO,
    };

    let err = report.check().unwrap_err();
    assert!(matches!(err, FairgateError::VerificationError(_)));
    assert!(err.to_string().contains("1 of 2"));
}

// ============================================================================
// Long-holder scenario
// ============================================================================

fn quick_long_holder() -> LongHolderParams {
    LongHolderParams {
        hold: Duration::from_millis(50),
        usage: Duration::from_millis(10),
        echo: false,
        ..LongHolderParams::default()
    }
}

#[test]
#[serial]
fn test_long_holder_waiters_go_before_late_arrivals() {
    let report = run_long_holder(&quick_long_holder()).unwrap();

    report.check().unwrap();
    assert!(report.waiters_admitted_first());
    assert_eq!(report.admission_order.len(), 6);
    assert!(
        report.admission_order[3..]
            .iter()
            .all(|actor| actor.category == Category::A)
    );
    assert_eq!(report.trace.completed(), 7);
}

#[test]
#[serial]
fn test_long_holder_without_late_wave() {
    let params = LongHolderParams {
        late: 0,
        waiters: 2,
        ..quick_long_holder()
    };

    let report = run_long_holder(&params).unwrap();
    report.check().unwrap();
    assert_eq!(report.admission_order.len(), 2);
    assert_eq!(report.trace.handoffs, 1);
}

#[test]
fn test_long_holder_check_reports_overtaking() {
    let report = LongHolderReport {
        waiters: 2,
        admission_order: vec![
            ActorId::new(Category::B, 1),
            ActorId::new(Category::A, 3),
            ActorId::new(Category::B, 2),
        ],
        events: Vec::new(),
        trace: TraceReport::default(),
    };

    assert!(!report.waiters_admitted_first());
    let err = report.check().unwrap_err();
    assert!(err.to_string().contains("overtook"));
}
