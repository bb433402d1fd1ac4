//! Integration tests for the access tracker lifecycle.

use dossier_core::config::TrackerConfig;
use dossier_tracker::AccessTracker;
use std::path::Path;
use std::time::Duration;

fn config(snapshot: &Path) -> TrackerConfig {
    TrackerConfig {
        snapshot_path: Some(snapshot.to_path_buf()),
        // Keep the periodic save out of the way so tests exercise the
        // mutation-triggered and shutdown paths deterministically.
        save_interval_secs: 3600,
        shutdown_flush_timeout_secs: 5,
    }
}

fn read_snapshot(path: &Path) -> Vec<String> {
    let data = std::fs::read(path).expect("snapshot file");
    serde_json::from_slice(&data).expect("snapshot json")
}

#[tokio::test]
async fn shutdown_flush_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accessed_cases.json");

    let tracker = AccessTracker::start(&config(&path)).await;
    tracker.record_access("A");
    tracker.record_access("B");
    tracker.record_access("A");
    tracker.shutdown().await;

    assert_eq!(read_snapshot(&path), ["A", "B"]);

    // A fresh tracker reproduces the exact prior order.
    let restarted = AccessTracker::start(&config(&path)).await;
    assert_eq!(restarted.list(), ["A", "B"]);
    restarted.shutdown().await;
}

#[tokio::test]
async fn mutations_are_flushed_in_background() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accessed_cases.json");

    let tracker = AccessTracker::start(&config(&path)).await;
    tracker.record_access("CASE-7");

    // The notify-driven save runs on the background task; poll briefly.
    let mut persisted = false;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if path.exists() && read_snapshot(&path) == ["CASE-7"] {
            persisted = true;
            break;
        }
    }
    assert!(persisted, "background flush never wrote the snapshot");
    tracker.shutdown().await;
}

#[tokio::test]
async fn corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accessed_cases.json");
    std::fs::write(&path, b"{not json").unwrap();

    let tracker = AccessTracker::start(&config(&path)).await;
    assert!(tracker.is_empty());
    tracker.shutdown().await;
}

#[tokio::test]
async fn clear_flushes_in_foreground() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accessed_cases.json");

    let tracker = AccessTracker::start(&config(&path)).await;
    tracker.record_access("A");
    tracker.clear().await;

    // clear() saves before returning, no polling needed.
    assert!(read_snapshot(&path).is_empty());
    assert!(tracker.is_empty());
    tracker.shutdown().await;
}

#[tokio::test]
async fn remove_is_persisted_on_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accessed_cases.json");

    let tracker = AccessTracker::start(&config(&path)).await;
    tracker.record_access("A");
    tracker.record_access("B");
    assert!(tracker.remove("A"));
    assert!(!tracker.remove("missing"));
    tracker.shutdown().await;

    assert_eq!(read_snapshot(&path), ["B"]);
}

#[tokio::test]
async fn loaded_duplicates_are_collapsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accessed_cases.json");
    std::fs::write(&path, br#"["A", "B", "A"]"#).unwrap();

    let tracker = AccessTracker::start(&config(&path)).await;
    assert_eq!(tracker.list(), ["A", "B"]);
    tracker.shutdown().await;
}
