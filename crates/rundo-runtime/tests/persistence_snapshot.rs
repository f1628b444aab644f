#![forbid(unsafe_code)]

//! Save/restore of undo/redo history through JSON snapshots.
//!
//! Run:
//!   cargo test -p rundo-runtime --features state-persistence --test persistence_snapshot

use rundo_runtime::undo::{EditTracker, StringSurface, UndoRedoOutcome};
use rundo_runtime::{HistorySnapshot, SnapshotError, TrackerConfig};
use web_time::{Duration, Instant};

fn edited_tracker() -> EditTracker<StringSurface> {
    let t0 = Instant::now();
    let mut tracker =
        EditTracker::new(StringSurface::new("hello world"), TrackerConfig::new(50, 10)).unwrap();

    tracker.on_before_text_changes_at(t0);
    tracker.surface_mut().insert(6, "brave ").unwrap();
    tracker.on_after_text_changes_at(t0);
    tracker.tick_at(t0 + Duration::from_millis(50));

    let t1 = t0 + Duration::from_millis(100);
    tracker.on_before_text_changes_at(t1);
    tracker.surface_mut().replace(0..5, "howdy").unwrap();
    tracker.on_after_text_changes_at(t1);
    tracker.tick_at(t1 + Duration::from_millis(50));

    assert_eq!(tracker.undo(), UndoRedoOutcome::Applied);
    tracker
}

#[test]
fn snapshot_survives_json_and_replays_in_new_session() {
    let tracker = edited_tracker();
    let text = tracker.current_text();
    let json = tracker.snapshot().to_json().unwrap();

    let restored = HistorySnapshot::from_json(&json).unwrap();
    assert_eq!(restored, tracker.snapshot());

    let mut next =
        EditTracker::new(StringSurface::new(text), TrackerConfig::new(50, 10)).unwrap();
    next.restore(restored);
    assert_eq!(next.redo(), UndoRedoOutcome::Applied);
    assert_eq!(next.surface().as_str(), "howdy brave world");
    next.undo();
    next.undo();
    assert_eq!(next.surface().as_str(), "hello world");
}

#[test]
fn json_uses_snake_case_field_names() {
    let json = edited_tracker().snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entry = &value["undo"][0];
    assert_eq!(entry["kind"], "addition");
    assert_eq!(entry["start"], 6);
    assert_eq!(entry["old_end"], 6);
    assert_eq!(entry["new_end"], 12);
    assert_eq!(entry["removed_text"], "");
    assert_eq!(entry["inserted_text"], "brave ");
    assert_eq!(value["redo"][0]["kind"], "replacement");
}

#[test]
fn inconsistent_delta_rejected_on_load() {
    let json = r#"{
        "undo": [{"kind": "deletion", "start": 0, "old_end": 3, "new_end": 0,
                  "removed_text": "ab", "inserted_text": ""}],
        "redo": []
    }"#;
    let err = HistorySnapshot::from_json(json).unwrap_err();
    assert!(matches!(err, SnapshotError::Serialization(_)));
}

#[test]
fn truncated_json_is_an_error() {
    assert!(HistorySnapshot::from_json("{\"undo\": [").is_err());
}
