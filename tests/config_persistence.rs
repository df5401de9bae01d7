//! Integration tests for persisted operator state

use bagpilot::config::{AppState, PlaybackConfig, MAX_RECENT_BAGS};
use bagpilot::error::BagPilotError;
use std::path::PathBuf;

#[test]
fn app_state_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_state.json");

    let mut state = AppState::default();
    state.add_recent_bag("/data/run1.bag", 4);
    state.add_recent_bag("/data/run2.bag", 9);
    state.note_save_path("/exports/trimmed.bag");
    state.playback_defaults = PlaybackConfig::new().with_rate(0.25).with_loop(true);

    state.save_to(&path).unwrap();
    let loaded = AppState::load_from(&path).unwrap();

    assert_eq!(loaded, state);
    assert_eq!(loaded.recent_bags[0].name, "run2.bag");
    assert_eq!(loaded.last_save_dir, Some(PathBuf::from("/exports")));
}

#[test]
fn missing_state_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = AppState::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, AppState::default());
}

#[test]
fn corrupt_state_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_state.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = AppState::load_from(&path).unwrap_err();
    assert!(matches!(err, BagPilotError::Config(_)));
}

#[test]
fn recent_bags_cap_and_dedup() {
    let mut state = AppState::default();

    for i in 0..20 {
        state.add_recent_bag(format!("/data/run{}.bag", i), i);
    }
    assert_eq!(state.recent_bags.len(), MAX_RECENT_BAGS);

    // Re-adding an existing bag moves it to the front without growing the list
    state.add_recent_bag("/data/run15.bag", 15);
    assert_eq!(state.recent_bags.len(), MAX_RECENT_BAGS);
    assert_eq!(state.recent_bags[0].path, PathBuf::from("/data/run15.bag"));
}

#[test]
fn cleanup_drops_bags_missing_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("keep.bag");
    std::fs::write(&existing, b"").unwrap();

    let mut state = AppState::default();
    state.add_recent_bag(&existing, 1);
    state.add_recent_bag(dir.path().join("gone.bag"), 2);

    state.cleanup_missing_bags();

    assert_eq!(state.recent_bags.len(), 1);
    assert_eq!(state.recent_bags[0].path, existing);
    // last_bag_path pointed at the missing bag and was cleared
    assert!(state.last_bag_path.is_none());
}
