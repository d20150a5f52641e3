//! CLI tests for the filehop binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Nothing listens on port 1
const DEAD_REDIS: &str = "redis://127.0.0.1:1/0";

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sessions")
}

#[test]
fn test_stats_on_empty_directory() {
    let dir = TempDir::new().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    cmd.arg("stats")
        .arg("--sessions-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions: 0"))
        .stdout(predicate::str::contains("Total events: 0"))
        .stdout(predicate::str::contains("Unique files: 0"));
}

#[test]
fn test_stats_on_fixtures() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    cmd.args(["stats", "--project", "/home/dev/app", "--sessions-dir"])
        .arg(fixtures())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions: 2"))
        .stdout(predicate::str::contains("Total reads: 7"))
        .stdout(predicate::str::contains("Total writes: 2"));
}

#[test]
fn test_transitions_text() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    cmd.args(["transitions", "--top", "1", "--project", "/home/dev/app", "--sessions-dir"])
        .arg(fixtures())
        .assert()
        .success()
        .stdout(predicate::str::contains("Transition matrix (3 source files):"))
        .stdout(predicate::str::contains(
            "  src/ranking/scorer.py -> tests/test_scorer.py: 2",
        ))
        .stdout(predicate::str::contains("weights.py ->").not());
}

#[test]
fn test_transitions_json() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    let output = cmd
        .args(["transitions", "--format", "json", "--project", "/home/dev/app", "--sessions-dir"])
        .arg(fixtures())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["source_files"], 3);
    assert_eq!(value["transitions"][0]["count"], 2);
}

#[test]
fn test_sync_with_unreachable_store_is_not_fatal() {
    let dir = TempDir::new().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    cmd.args(["sync", "--redis-url", DEAD_REDIS, "--sessions-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Cannot connect to Redis at redis://127.0.0.1:1/0"));
}

#[test]
fn test_predict_with_unreachable_store_is_not_fatal() {
    let dir = TempDir::new().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    cmd.args(["predict", "src/main.rs", "--redis-url", DEAD_REDIS, "--sessions-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Cannot connect to Redis"));
}

#[test]
fn test_bad_settings_file_fails() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("filehop.toml");
    std::fs::write(&settings, "unknown_key = 1").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    cmd.arg("stats")
        .arg("--config")
        .arg(&settings)
        .arg("--sessions-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings file"));
}

#[test]
fn test_settings_file_supplies_top() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("filehop.toml");
    std::fs::write(&settings, "project_root = \"/home/dev/app\"\ntop = 2\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filehop");
    cmd.arg("transitions")
        .arg("--config")
        .arg(&settings)
        .arg("--sessions-dir")
        .arg(fixtures())
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 transitions:"));
}
