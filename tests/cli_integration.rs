//! CLI integration tests for Shellmate
//!
//! Everything here runs offline against an isolated config directory; the
//! ask flow is only exercised up to the point where it refuses to talk to
//! the network without a token.

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the shellmate binary with an isolated config dir
fn shellmate_cmd(config_dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shellmate"));
    cmd.env("SHELLMATE_CONFIG_DIR", config_dir.path());
    cmd
}

// =============================================================================
// Basics
// =============================================================================

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("become"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_empty_question_fails() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to ask"));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("persona"))
        .stdout(predicate::str::contains("bold bright blue"))
        .stdout(predicate::str::contains("bright gray"));
}

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();

    let output = shellmate_cmd(&dir)
        .args(["config", "show", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["authenticated"], false);
    assert_eq!(json["run"], true);
    assert_eq!(json["meta"], true);
}

#[test]
fn test_config_set_color_persists() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["config", "set", "command_color", "bright green"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set command_color"));

    shellmate_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bright green"));
}

#[test]
fn test_config_set_rejects_bad_color() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["config", "set", "comment_color", "octarine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("octarine"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["config", "set", "favourite_editor", "ed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_set_run_toggle() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["config", "set", "run", "false"])
        .assert()
        .success();

    let output = shellmate_cmd(&dir)
        .args(["config", "show", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["run"], false);
}

// =============================================================================
// Persona
// =============================================================================

#[test]
fn test_become_sets_persona() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["become", "angry", "pirate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("angry pirate"));

    shellmate_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("angry pirate"));
}

#[test]
fn test_become_default_reverts() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["become", "pirate"])
        .assert()
        .success();

    shellmate_cmd(&dir)
        .args(["become", "default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plain answers"));
}

#[test]
fn test_become_without_persona_fails() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir).arg("become").assert().failure();
}

// =============================================================================
// Ask (offline)
// =============================================================================

#[test]
fn test_ask_without_token_points_to_login() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .args(["how", "do", "I", "list", "files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login"));
}

// =============================================================================
// Login
// =============================================================================

#[test]
fn test_login_rejects_empty_token() {
    let dir = TempDir::new().unwrap();

    shellmate_cmd(&dir)
        .arg("login")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No token provided"));
}
