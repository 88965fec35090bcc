//! Integration tests for the rink binary.
//!
//! These tests verify end-to-end behavior including:
//! - Profile setup and schedule generation
//! - Plan resolution and substitutions
//! - Meal tracking and macro totals
//! - Workout logging, XP and promotion
//! - Custom workout types

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// 2024-06-03 is a Monday
const MONDAY: &str = "2024-06-03";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rink"))
}

/// Run `rink` against a data dir on a fixed date
fn rink(temp_dir: &TempDir, args: &[&str]) -> Command {
    let mut cmd = cli();
    cmd.args(args)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY);
    cmd
}

/// Build-muscle wing at level A, 175 lb
fn setup_profile(temp_dir: &TempDir) {
    rink(
        temp_dir,
        &["profile", "set", "--goal", "build-muscle", "--weight", "175"],
    )
    .assert()
    .success();
}

fn read_state(temp_dir: &TempDir) -> serde_json::Value {
    let contents =
        fs::read_to_string(temp_dir.path().join("state.json")).expect("Failed to read state");
    serde_json::from_str(&contents).expect("State should be valid JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Hockey training and nutrition planner",
        ));
}

#[test]
fn test_profile_show_defaults_without_state() {
    let temp_dir = setup_test_dir();

    rink(&temp_dir, &["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal:      maintain"))
        .stdout(predicate::str::contains("Position:  wing"))
        .stdout(predicate::str::contains("bronze (0/100 XP)"));

    // Reads never create the state file
    assert!(!temp_dir.path().join("state.json").exists());
}

#[test]
fn test_profile_set_generates_schedule() {
    let temp_dir = setup_test_dir();

    rink(
        &temp_dir,
        &["profile", "set", "--goal", "build-muscle", "--weight", "175"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("Weekly schedule regenerated"));

    let state = read_state(&temp_dir);
    let schedule = &state["profile"]["weekly_schedule"];
    assert_eq!(schedule["monday"], "upper_strength");
    assert_eq!(schedule["tuesday"], "legs_strength");
    assert_eq!(schedule["wednesday"], "active_recovery");
    assert_eq!(schedule["saturday"], "full_body");
    assert_eq!(schedule["sunday"], "rest");
    assert_eq!(state["profile"]["weight_lbs"], 175.0);
}

#[test]
fn test_profile_set_without_training_inputs_keeps_schedule() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["schedule", "--set", "sun=full_body"])
        .assert()
        .success();

    rink(&temp_dir, &["profile", "set", "--age", "17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly schedule regenerated").not());

    let state = read_state(&temp_dir);
    assert_eq!(state["profile"]["age"], 17);
    assert_eq!(state["profile"]["weekly_schedule"]["sunday"], "full_body");
}

#[test]
fn test_profile_set_rejects_invalid_values() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["profile", "set", "--height-inches", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidProfile"));

    rink(&temp_dir, &["profile", "set", "--goal", "bulk"])
        .assert()
        .failure();

    let state = read_state(&temp_dir);
    assert_eq!(state["profile"]["goal"], "build_muscle");
}

#[test]
fn test_schedule_shows_labels() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["schedule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upper Body Strength"))
        .stdout(predicate::str::contains("Active Recovery"))
        .stdout(predicate::str::contains("Rest Day"));
}

#[test]
fn test_schedule_set_rejects_unknown_code() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["schedule", "--set", "mon=yoga"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yoga"));

    let state = read_state(&temp_dir);
    assert_eq!(state["profile"]["weekly_schedule"]["monday"], "upper_strength");
}

#[test]
fn test_plan_for_monday() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    // 60 minutes at 12 per exercise gives 5 slots
    rink(&temp_dir, &["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MONDAY: Upper Body Strength"))
        .stdout(predicate::str::contains("0. Barbell Bench Press"))
        .stdout(predicate::str::contains("4. "))
        .stdout(predicate::str::contains("5. ").not());
}

#[test]
fn test_default_command_shows_plan() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Upper Body Strength"));
}

#[test]
fn test_plan_duration_bounds_length() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["profile", "set", "--duration", "20"])
        .assert()
        .success();

    rink(&temp_dir, &["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("2. ").not());
}

#[test]
fn test_plan_on_recovery_day_shows_stretches() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["plan", "--day", "wed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recovery day"));

    rink(&temp_dir, &["plan", "--day", "sun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest day"));
}

#[test]
fn test_plan_swap_within_category() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["plan", "--swap", "0=push_up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0. Push-up (swapped)"));

    // Swaps are not persisted
    rink(&temp_dir, &["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0. Barbell Bench Press"));
}

#[test]
fn test_plan_swap_across_category_fails() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["plan", "--swap", "0=back_squat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidSubstitution"));

    rink(&temp_dir, &["plan", "--swap", "9=push_up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SlotOutOfRange"));
}

#[test]
fn test_plan_alternatives() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["plan", "--alternatives", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alternatives for slot 0"))
        .stdout(predicate::str::contains("push_up"))
        .stdout(predicate::str::contains("landmine_press"));
}

#[test]
fn test_exercises_by_category() {
    cli()
        .args(["exercises", "--category", "legs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("back_squat"))
        .stdout(predicate::str::contains("bench_press").not());
}

#[test]
fn test_macro_targets() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["macros"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3125"))
        .stdout(predicate::str::contains("175g"))
        .stdout(predicate::str::contains("449g"))
        .stdout(predicate::str::contains("70g"));
}

#[test]
fn test_meal_select_and_toggle() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(
        &temp_dir,
        &[
            "meal",
            "select",
            "--meal-type",
            "breakfast",
            "--meal-id",
            "oatmeal_berries",
        ],
    )
    .assert()
    .success();

    rink(&temp_dir, &["meal", "toggle", "--meal-type", "breakfast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked consumed (+5 XP)"))
        .stdout(predicate::str::contains("bronze (5/100 XP)"));

    rink(&temp_dir, &["macros"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[✓] breakfast"));

    // Un-marking keeps the XP
    rink(&temp_dir, &["meal", "toggle", "--meal-type", "breakfast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked not consumed"))
        .stdout(predicate::str::contains("bronze (5/100 XP)"));

    let state = read_state(&temp_dir);
    assert_eq!(state["meal_logs"].as_array().unwrap().len(), 1);
    assert_eq!(state["meal_logs"][0]["consumed"], false);
}

#[test]
fn test_meal_toggle_without_selection_fails() {
    let temp_dir = setup_test_dir();

    rink(&temp_dir, &["meal", "toggle", "--meal-type", "dinner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));
}

#[test]
fn test_meal_select_unknown_meal_fails() {
    let temp_dir = setup_test_dir();

    rink(
        &temp_dir,
        &["meal", "select", "--meal-type", "lunch", "--meal-id", "poutine"],
    )
    .assert()
    .failure();
}

#[test]
fn test_workout_log_and_delete() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["workout", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged upper_strength workout"))
        .stdout(predicate::str::contains("bronze (15/100 XP)"));

    // One workout per date
    rink(&temp_dir, &["workout", "log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DuplicateWorkoutLog"));

    rink(&temp_dir, &["workout", "delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-15 XP"))
        .stdout(predicate::str::contains("bronze (0/100 XP)"));

    rink(&temp_dir, &["workout", "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));
}

#[test]
fn test_promote_requires_full_bar() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["workout", "log"]).assert().success();

    rink(&temp_dir, &["promote"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PromotionNotReady"));

    let state = read_state(&temp_dir);
    assert_eq!(state["profile"]["xp"], 15);
    assert_eq!(state["profile"]["tier"], "bronze");
}

#[test]
fn test_promote_with_full_bar() {
    let temp_dir = setup_test_dir();

    // Seven logged workouts on consecutive days cap the bar at 100
    for day in 3..10 {
        let date = format!("2024-06-{:02}", day);
        cli()
            .args(["workout", "log", "--date", &date, "--data-dir"])
            .arg(temp_dir.path())
            .assert()
            .success();
    }
    assert_eq!(read_state(&temp_dir)["profile"]["xp"], 100);

    rink(&temp_dir, &["promote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Promoted: bronze → silver"));

    let state = read_state(&temp_dir);
    assert_eq!(state["profile"]["xp"], 0);
    assert_eq!(state["profile"]["tier"], "silver");
}

#[test]
fn test_custom_workout_lifecycle() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(
        &temp_dir,
        &[
            "custom",
            "add",
            "--code",
            "pond-hockey",
            "--name",
            "Pond Hockey Prep",
            "--category",
            "skills",
            "--category",
            "legs",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("'pond_hockey'"));

    rink(&temp_dir, &["custom", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skills, legs"));

    rink(&temp_dir, &["schedule", "--set", "mon=pond_hockey"])
        .assert()
        .success();

    rink(&temp_dir, &["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MONDAY: Pond Hockey Prep"))
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("2. ").not());

    rink(&temp_dir, &["custom", "remove", "--code", "pond_hockey"])
        .assert()
        .success();

    // The schedule still names the code but it reads back as rest
    assert_eq!(
        read_state(&temp_dir)["profile"]["weekly_schedule"]["monday"],
        "pond_hockey"
    );
    rink(&temp_dir, &["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest day"));
}

#[test]
fn test_custom_workout_cannot_shadow_builtin() {
    let temp_dir = setup_test_dir();

    rink(
        &temp_dir,
        &[
            "custom",
            "add",
            "--code",
            "full_body",
            "--name",
            "Mine",
            "--category",
            "legs",
        ],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("DuplicateWorkoutType"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let temp_dir = setup_test_dir();

    rink(&temp_dir, &["-vv", "workout", "log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged rest workout"))
        .stderr(predicate::str::contains("Logged 'rest' workout"));
}

#[test]
fn test_schedule_set_accepts_kebab_case_codes() {
    let temp_dir = setup_test_dir();
    setup_profile(&temp_dir);

    rink(&temp_dir, &["schedule", "--set", "mon=active-recovery"])
        .assert()
        .success();

    let state = read_state(&temp_dir);
    assert_eq!(state["profile"]["weekly_schedule"]["monday"], "active_recovery");

    rink(&temp_dir, &["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recovery day"));
}

#[test]
fn test_meal_select_rejects_wrong_meal_type() {
    let temp_dir = setup_test_dir();

    rink(
        &temp_dir,
        &["meal", "select", "--meal-type", "breakfast", "--meal-id", "beef_pasta"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("NotFound"));

    assert!(!temp_dir.path().join("state.json").exists());
}

#[test]
fn test_stretch_routines() {
    cli()
        .arg("stretches")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pre-skate Dynamic Warm-up"))
        .stdout(predicate::str::contains("Post-game Cool-down"));

    cli()
        .args(["stretches", "--routine", "post_game"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hamstring stretch"))
        .stdout(predicate::str::contains("Pre-skate").not());

    cli()
        .args(["stretches", "--routine", "zamboni"])
        .assert()
        .failure();
}

#[test]
fn test_workout_history_window() {
    let temp_dir = setup_test_dir();

    for date in ["2024-05-20", "2024-05-30", "2024-06-02"] {
        cli()
            .args(["workout", "log", "--date", date, "--data-dir"])
            .arg(temp_dir.path())
            .assert()
            .success();
    }

    // Seven days ending Monday 2024-06-03 starts on 2024-05-28
    rink(&temp_dir, &["workout", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05-30"))
        .stdout(predicate::str::contains("2024-06-02"))
        .stdout(predicate::str::contains("2024-05-20").not())
        .stdout(predicate::str::contains("2 workouts, 30 XP"));

    rink(&temp_dir, &["workout", "history", "--days", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged"));
}

/// `dirs` reads XDG_CONFIG_HOME on Linux only
#[cfg(target_os = "linux")]
#[test]
fn test_configured_workout_xp_is_shown_and_awarded() {
    let temp_dir = setup_test_dir();
    let config_home = setup_test_dir();
    let config_dir = config_home.path().join("rink");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[progression]\nworkout_log_xp = 20\n",
    )
    .unwrap();

    rink(&temp_dir, &["profile", "set", "--goal", "build-muscle"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .assert()
        .success();

    rink(&temp_dir, &["plan"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("+20 XP when logged"));

    rink(&temp_dir, &["workout", "log"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bronze (20/100 XP)"));
}
