#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::path::Path;
use tempfile::{NamedTempFile, tempdir};

#[allow(deprecated)]
fn cli_command(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env("CLASS_PLANNER_CONFIG", config)
        .env("RUST_LOG", "off");
    cmd
}

fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let config = NamedTempFile::new().expect("create config file");
    cli_command(config.path())
        .env("CLASS_PLANNER_BACKEND", "memory")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_shows_the_seeded_monday() {
    run_cli("show segunda\nquit\n")
        .success()
        .stdout(str_contains("Segunda-feira"))
        .stdout(str_contains("Henrique"))
        .stdout(str_contains("Proj. Integ 3"));
}

#[test]
fn cli_refuses_edits_before_login() {
    run_cli("remove m1\nlogin admin nope\nwhoami\nquit\n")
        .success()
        .stdout(str_contains("Error: editing requires an admin session"))
        .stdout(str_contains("Invalid credentials."))
        .stdout(str_contains("anonymous (read-only)"));
}

#[test]
fn cli_admin_can_add_and_remove_classes() {
    run_cli("login admin admin\nadd 3B sexta 7:30 8:20\nremove m2\nremove m2\nquit\n")
        .success()
        .stdout(str_contains("Logged in as admin."))
        .stdout(str_contains("Added class "))
        .stdout(str_contains("Removed class m2."))
        .stdout(str_contains("Error: class m2 not found"));
}

#[test]
fn cli_reports_time_slot_errors() {
    run_cli("login admin admin\nslot set 99 08:00 08:50\nslot add 24:00 24:50\nquit\n")
        .success()
        .stdout(str_contains(
            "Error: time slot 99 not found (schedule has 12 slots)",
        ))
        .stdout(str_contains("invalid time '24:00'"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "login admin admin\nsave json {path}\nset m3 teacher Temporario\nload json {path}\nshow segunda\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Schedule loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output
        .split("Schedule loaded from")
        .last()
        .unwrap_or_default();
    assert!(
        !after_reload.contains("Temporario"),
        "edited teacher should not appear after reload:\n{after_reload}"
    );
    assert!(after_reload.contains("Henrique"));
}

#[test]
fn cli_changes_persist_between_runs() {
    let config = NamedTempFile::new().expect("create config file");
    let data = tempdir().expect("create data dir");

    cli_command(config.path())
        .env("CLASS_PLANNER_BACKEND", "file")
        .env("CLASS_PLANNER_DATA_PATH", data.path())
        .write_stdin("login admin admin\nset m1 teacher Marta\nquit\n")
        .assert()
        .success();

    cli_command(config.path())
        .env("CLASS_PLANNER_BACKEND", "file")
        .env("CLASS_PLANNER_DATA_PATH", data.path())
        .write_stdin("whoami\nshow segunda\nquit\n")
        .assert()
        .success()
        .stdout(str_contains("admin (admin: true)"))
        .stdout(str_contains("Marta"));
}

#[test]
fn cli_rejects_imports_with_duplicate_ids() {
    use class_planner::{DayOfWeek, ScheduleState, save_state_to_json};

    let tmp = NamedTempFile::new().expect("create temp file");
    let mut state = ScheduleState::seeded_for(DayOfWeek::Segunda);
    let duplicate = state.classes[0].clone();
    state.classes.push(duplicate);
    save_state_to_json(&state, tmp.path()).expect("write import file");

    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let assert = run_cli(&format!("login admin admin\nload json {path}\nquit\n")).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("duplicate class id m1"), "{output}");
    assert!(!output.contains("failed to save schedule"), "{output}");
    assert!(!output.contains("Schedule loaded from"), "{output}");
}
