//! CLI integration tests for graph-admin
//!
//! Only paths that fail before Docker is contacted are exercised here.

use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the compiled graph-admin binary (resolved at compile time)
fn graph_admin_bin() -> String {
    env!("CARGO_BIN_EXE_graph-admin").to_string()
}

fn run_in(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(graph_admin_bin())
        .current_dir(dir.path())
        .args(args)
        .output()
        .expect("Failed to run graph-admin")
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let output = run_in(&dir, &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["initialize_graph", "load_data", "run_yasgui", "remove_graph"] {
        assert!(stdout.contains(command), "help should mention {}", command);
    }
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run_in(&dir, &["drop_everything"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_load_data_missing_manifest() {
    let dir = TempDir::new().unwrap();
    let output = run_in(&dir, &["load_data", "--graph", "blazegraph"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
    assert!(stderr.contains("[M001]"), "stderr: {}", stderr);
}

#[test]
fn test_load_data_malformed_manifest_names_line() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("graph_data.txt"),
        "# sources\ngood.nq\nbad.nq\tnot-a-url\n",
    )
    .unwrap();

    let output = run_in(&dir, &["load_data", "--graph", "blazegraph"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
    assert!(stderr.contains("[M003]"), "stderr: {}", stderr);
    assert!(stderr.contains(":3"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("graph-admin.yml"), "hots: typo\n").unwrap();
    std::fs::write(dir.path().join("graph_data.txt"), "a.nq\n").unwrap();

    let output = run_in(&dir, &["load_data", "--graph", "blazegraph"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
    assert!(stderr.contains("[E002]"), "stderr: {}", stderr);
}
