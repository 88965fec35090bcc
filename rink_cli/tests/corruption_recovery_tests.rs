//! Corruption recovery tests for the rink binary.
//!
//! These tests verify the system can handle:
//! - Corrupted state files
//! - Missing files
//! - Schedules naming workout types that no longer exist

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rink"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_state_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Write corrupted state file
    let state_path = data_dir.join("state.json");
    fs::write(&state_path, "{ invalid json }}}}").expect("Failed to write corrupted state");

    cli()
        .args(["profile", "show"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("bronze (0/100 XP)"));
}

#[test]
fn test_write_after_corruption_replaces_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let state_path = data_dir.join("state.json");
    fs::write(&state_path, "not json at all").expect("Failed to write corrupted state");

    cli()
        .args(["workout", "log", "--date", "2024-06-03"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    let contents = fs::read_to_string(&state_path).expect("Failed to read state");
    let state: serde_json::Value =
        serde_json::from_str(&contents).expect("State should be valid JSON again");
    assert_eq!(state["profile"]["xp"], 15);
}

#[test]
fn test_truncated_state_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Simulate a partial write
    let state_path = data_dir.join("state.json");
    fs::write(&state_path, r#"{"profile":{"user_id":"#).expect("Failed to write state");

    cli()
        .arg("macros")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();
}

#[test]
fn test_missing_data_dir_is_created() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("nested/rink");

    cli()
        .args(["profile", "set", "--age", "18"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    assert!(data_dir.join("state.json").exists());
}

#[test]
fn test_unknown_schedule_code_reads_as_rest() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .args(["profile", "set", "--goal", "maintain"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // Hand-edit Monday to a code nothing defines
    let state_path = data_dir.join("state.json");
    let contents = fs::read_to_string(&state_path).expect("Failed to read state");
    let mut state: serde_json::Value = serde_json::from_str(&contents).unwrap();
    state["profile"]["weekly_schedule"]["monday"] = "zamboni_drills".into();
    fs::write(&state_path, serde_json::to_string(&state).unwrap()).unwrap();

    cli()
        .args(["plan", "--day", "mon"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest day"));
}

#[test]
fn test_missing_schedule_days_default_to_rest() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .args(["profile", "set", "--goal", "maintain"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    let state_path = data_dir.join("state.json");
    let contents = fs::read_to_string(&state_path).expect("Failed to read state");
    let mut state: serde_json::Value = serde_json::from_str(&contents).unwrap();
    state["profile"]["weekly_schedule"] = serde_json::json!({ "monday": "full_body" });
    fs::write(&state_path, serde_json::to_string(&state).unwrap()).unwrap();

    cli()
        .args(["plan", "--day", "tue"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest day"));

    cli()
        .args(["plan", "--day", "mon"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Body"));
}
