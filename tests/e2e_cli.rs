//! CLI end-to-end tests
//!
//! Tests for the trackpilot command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the trackpilot binary
#[allow(deprecated)]
fn trackpilot_cmd() -> Command {
    Command::cargo_bin("trackpilot").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = trackpilot_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("trackpilot"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "trackpilot {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_cli_select_help() {
    let mut cmd = trackpilot_cmd();
    cmd.args(["select", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("select tracks"));
}

#[test]
fn test_cli_select_defaults() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("select")
        .arg(fixture("scenario_basic.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Renderer 0 (video, video): enabled"))
        .stdout(predicate::str::contains("Group 0 (adaptive, reason unknown)"))
        .stdout(predicate::str::contains("lang=en"))
        .stdout(predicate::str::contains("Tunneling").not());
}

#[test]
fn test_cli_select_with_config() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("--config")
        .arg(fixture("config_sd.json"))
        .arg("select")
        .arg(fixture("scenario_basic.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Group 0 (fixed, reason unknown)"))
        .stdout(predicate::str::contains("id=v360"))
        .stdout(predicate::str::contains("id=a-de"))
        .stdout(predicate::str::contains("Tunneling: session 17"));
}

#[test]
fn test_cli_select_json() {
    let mut cmd = trackpilot_cmd();
    let output = cmd
        .arg("select")
        .arg(fixture("scenario_basic.json"))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["unmapped_groups"], 1);
    let renderers = report["renderers"].as_array().unwrap();
    assert_eq!(renderers.len(), 3);
    assert_eq!(renderers[0]["track_type"], "video");
    assert_eq!(renderers[0]["support"], "playable_tracks");
    assert_eq!(renderers[0]["selection"]["adaptive"], true);
    assert_eq!(renderers[0]["selection"]["tracks"], serde_json::json!([0, 1, 2]));
    assert_eq!(renderers[2]["enabled"], true);
    assert_eq!(renderers[2]["selection"]["reason"], "unknown");
}

#[test]
fn test_cli_select_missing_scenario() {
    let mut cmd = trackpilot_cmd();
    cmd.args(["select", "/nonexistent/scenario.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_select_malformed_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"renderers\": [").unwrap();

    let mut cmd = trackpilot_cmd();
    cmd.arg("select")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("scenario parse error"));
}

#[test]
fn test_cli_select_empty_group() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty_group.json");
    fs::write(&path, r#"{"renderers": [], "groups": [[]]}"#).unwrap();

    let mut cmd = trackpilot_cmd();
    cmd.arg("select")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid track group"));
}

#[test]
fn test_cli_inspect() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("inspect")
        .arg(fixture("scenario_basic.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Renderers: 3"))
        .stdout(predicate::str::contains("[0] video (video): playable_tracks"))
        .stdout(predicate::str::contains("adaptive seamless"))
        .stdout(predicate::str::contains("Unmapped groups: 1"))
        .stdout(predicate::str::contains("application/id3"));
}

#[test]
fn test_cli_validate_default() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No config file specified"))
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_cli_validate_reports_warnings() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("validate")
        .arg(fixture("config_warnings.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 warning(s)"))
        .stdout(predicate::str::contains("excludes every video track"));
}

#[test]
fn test_cli_validate_uses_global_config() {
    let mut cmd = trackpilot_cmd();
    cmd.arg("--config")
        .arg(fixture("config_sd.json"))
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("config_sd.json"))
        .stdout(predicate::str::contains("System languages: 2"));
}

#[test]
fn test_cli_validate_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    let mut cmd = trackpilot_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config parse error"));
}
