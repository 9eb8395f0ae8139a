//! Integration tests for the `czk` binary.
//!
//! These run the compiled binary and only cover behavior that does not need
//! the external scanner installed.

use assert_fs::TempDir;
use predicates::prelude::*;
use std::process::{Command, Output};

fn czk(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_czk"))
        .args(args)
        .env("PATH", "")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run czk")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_lists_both_subcommands() {
    let output = czk(&["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(predicate::str::contains("test").eval(&text));
    assert!(predicate::str::contains("execute").eval(&text));
}

#[test]
fn subcommand_help_lists_scanner_options() {
    let output = czk(&["test", "--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for flag in [
        "--media",
        "--hash-size",
        "--image-similarity",
        "--hash-alg",
        "--image-filter",
        "--video-tolerance",
        "--top",
        "--out-dir",
        "--expanded",
    ] {
        assert!(text.contains(flag), "missing {flag} in help");
    }
}

#[test]
fn missing_scanner_is_reported() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().to_string_lossy().into_owned();

    let output = czk(&["test", &target, "--out-dir", &target]);

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(predicate::str::starts_with("Error:").eval(&text), "{text}");
    assert!(text.contains("czkawka_cli is not installed or not available in PATH."));
}

#[test]
fn invalid_video_tolerance_is_a_usage_error() {
    let output = czk(&["test", "--video-tolerance", "25"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--video-tolerance"));
}

#[test]
fn invalid_hash_size_is_a_usage_error() {
    let output = czk(&["execute", "--hash-size", "24"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("8, 16, 32, 64"));
}

#[test]
fn unknown_subcommand_fails() {
    let output = czk(&["purge"]);

    assert!(!output.status.success());
}
