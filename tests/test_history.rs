//! Integration tests for the file-backed history store.

mod common;

use std::fs;

use hdb_dash::{History, HistoryStore};

use common::{month, priced};

fn sample_history() -> History {
    let mut history = History::new();
    history.insert(month("2023-12"), priced("2023-12", &[450_000.0, 550_000.0]));
    history.insert(
        month("2024-01"),
        priced("2024-01", &[400_000.0, 600_000.0, 1_050_000.0]),
    );
    history
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());

    let history = sample_history();
    store.save(&history).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, history);
}

#[test]
fn history_file_is_keyed_by_month_label() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());
    store.save(&sample_history()).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(doc.get("2023-12").is_some());
    assert!(doc.get("2024-01").is_some());
    assert_eq!(doc["2024-01"].as_array().unwrap().len(), 3);
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());

    store.save(&sample_history()).unwrap();

    let mut smaller = History::new();
    smaller.insert(month("2024-02"), priced("2024-02", &[480_000.0]));
    store.save(&smaller).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key(&month("2024-02")));
}

// ---------------------------------------------------------------------------
// Missing and corrupt files
// ---------------------------------------------------------------------------

#[test]
fn missing_file_loads_as_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());

    let loaded = store.load().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn corrupt_file_is_an_error_and_left_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());

    fs::write(store.path(), "{not json").unwrap();

    assert!(store.load().is_err());
    let contents = fs::read_to_string(store.path()).unwrap();
    assert_eq!(contents, "{not json");
}

#[test]
fn valid_json_of_wrong_shape_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());

    fs::write(store.path(), "[1, 2, 3]").unwrap();
    assert!(store.load().is_err());
}

// ---------------------------------------------------------------------------
// Atomic write
// ---------------------------------------------------------------------------

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("deep").join("data");
    let store = HistoryStore::new(&nested);

    store.save(&sample_history()).unwrap();
    assert!(store.path().exists());
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path());

    store.save(&sample_history()).unwrap();

    let entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["resale_history.json"]);
}
