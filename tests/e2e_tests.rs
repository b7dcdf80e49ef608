//! End-to-end tests for the studyfocus binary.
//!
//! Every test points `--config` at a temporary file so the user's real
//! settings are never touched.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn studyfocus() -> Command {
    let mut cmd = Command::cargo_bin("studyfocus").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn temp_settings() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    (dir, path)
}

// ============================================================================
// Help / Completions
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    studyfocus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("countdown"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_completions_bash() {
    studyfocus()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studyfocus"));
}

#[test]
fn test_unknown_mode_is_rejected() {
    let (_dir, path) = temp_settings();
    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "nap", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nap"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_path_prints_override() {
    let (_dir, path) = temp_settings();
    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.json"));
}

#[test]
fn test_config_show_defaults_without_file() {
    let (_dir, path) = temp_settings();
    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("集中: 25分"));
    assert!(!path.exists());
}

#[test]
fn test_config_set_clamps_and_persists() {
    let (_dir, path) = temp_settings();
    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "focus", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("99分"));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["focus_minutes"], 99);

    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("集中: 99分"));
}

#[test]
fn test_broken_settings_file_fails_with_hint() {
    let (_dir, path) = temp_settings();
    fs::write(&path, "{ not json").unwrap();

    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("エラー"))
        .stderr(predicate::str::contains("修正するか削除"));
}

// ============================================================================
// Run / Countdown
// ============================================================================

#[test]
fn test_run_quits_on_q_and_saves_mode() {
    let (_dir, path) = temp_settings();
    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["run", "--mode", "long", "--long", "20", "--no-sound", "--no-media"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[長休憩] 20:00"));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["last_mode"], "long");
    assert_eq!(saved["long_minutes"], 20);
}

#[test]
fn test_run_reports_unknown_line_command() {
    let (_dir, path) = temp_settings();
    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["run", "--no-sound", "--no-media"])
        .write_stdin("jump\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("不明なコマンドです: jump"));
}

#[test]
fn test_countdown_one_second() {
    let (_dir, path) = temp_settings();
    studyfocus()
        .arg("--config")
        .arg(&path)
        .args(["countdown", "--seconds", "1", "--no-sound"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("カウントダウン終了"));
}
