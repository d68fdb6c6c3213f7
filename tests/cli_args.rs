//! Tests for the runtime-config binary.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runs the binary with an isolated config dir and a scrubbed environment.
fn run(args: &[&str], vars: &[(&str, &str)]) -> (TempDir, Output) {
    let config_home = TempDir::new().expect("Failed to create temp dir");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runtime-config"));
    cmd.env_clear()
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .args(args);
    for (k, v) in vars {
        cmd.env(k, v);
    }
    let output = cmd.output().expect("Failed to execute command");
    (config_home, output)
}

#[test]
fn test_help_lists_commands() {
    let (_dir, output) = run(&["--help"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("check"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("--ignore"));
}

#[test]
fn test_check_fails_when_key_unset() {
    let (_dir, output) = run(
        &["check", "-k", "RC_HOST", "-k", "RC_PORT", "-i", "RC_PORT"],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RC_HOST: (not set)"));
    assert!(!stderr.contains("RC_PORT"));
}

#[test]
fn test_check_passes_when_env_set() {
    let (_dir, output) = run(
        &["check", "-k", "RC_HOST", "-k", "RC_PORT", "-i", "RC_PORT"],
        &[("RC_HOST", "localhost")],
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_status_prints_sorted_lines() {
    let (_dir, output) = run(
        &["status", "-k", "RC_PORT", "-k", "RC_HOST"],
        &[("RC_HOST", "localhost")],
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "RC_HOST: localhost\nRC_PORT: (not set)\n"
    );
}

#[test]
fn test_missing_json() {
    let (_dir, output) = run(&["missing", "--json", "-k", "RC_B", "-k", "RC_A"], &[]);
    assert!(output.status.success());
    let missing: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(missing, vec!["RC_A", "RC_B"]);
}

#[test]
fn test_manifest_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keys.toml");
    fs::write(&path, "keys = [\"RC_HOST\"]\nignore = []\n").unwrap();

    let (_home, output) = run(
        &["check", "--json", "--manifest", path.to_str().unwrap()],
        &[("RC_HOST", "db.local")],
    );
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["complete"], true);
}

#[test]
fn test_bad_manifest_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keys.toml");
    fs::write(&path, "keys = [").unwrap();

    let (_home, output) = run(&["status", "--manifest", path.to_str().unwrap()], &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse manifest"));
}
