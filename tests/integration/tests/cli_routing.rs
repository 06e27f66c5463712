//! CLI binary integration tests.
//!
//! These tests exercise the compiled `chatgate` binary to verify that
//! top-level command routing, help text, and error handling work as
//! expected.

use std::path::PathBuf;
use std::process::Command;

/// Locate the compiled `chatgate` binary in the workspace target directory.
///
/// Cargo sets `CARGO_MANIFEST_DIR` to the manifest directory of the package
/// being tested. We navigate up to the workspace root and look inside
/// `target/debug/`.
fn chatgate_bin() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> workspace root
    let workspace_root = manifest_dir
        .parent()
        .expect("tests/ parent")
        .parent()
        .expect("workspace root");
    let bin = workspace_root.join("target").join("debug").join("chatgate");
    assert!(
        bin.exists(),
        "chatgate binary not found at {}; run `cargo build -p chatgate-cli` first",
        bin.display()
    );
    bin
}

fn chatgate_cmd() -> Command {
    Command::new(chatgate_bin())
}

#[test]
fn test_cli_version() {
    let output = chatgate_cmd()
        .arg("version")
        .output()
        .expect("failed to run chatgate");
    assert!(output.status.success(), "version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("chatgate"),
        "version output should contain 'chatgate', got: {}",
        stdout
    );
}

#[test]
fn test_cli_help() {
    let output = chatgate_cmd()
        .arg("--help")
        .output()
        .expect("failed to run chatgate");
    assert!(output.status.success(), "--help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("serve"),
        "help output should mention 'serve', got: {}",
        stdout
    );
}

#[test]
fn test_cli_serve_help() {
    let output = chatgate_cmd()
        .args(["serve", "--help"])
        .output()
        .expect("failed to run chatgate");
    assert!(output.status.success(), "serve --help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--port"), "serve help should mention --port");
    assert!(stdout.contains("--host"), "serve help should mention --host");
}

#[test]
fn test_cli_unknown_command_fails() {
    let output = chatgate_cmd()
        .arg("frobnicate")
        .output()
        .expect("failed to run chatgate");
    assert!(
        !output.status.success(),
        "unknown command should exit nonzero"
    );
}

#[test]
fn test_cli_serve_missing_config_file_fails() {
    let output = chatgate_cmd()
        .args(["--config", "/nonexistent/chatgate.json5", "serve"])
        .output()
        .expect("failed to run chatgate");
    assert!(
        !output.status.success(),
        "serve with a missing config file should exit nonzero"
    );
}
