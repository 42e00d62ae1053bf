//! End-to-end tests for the blackbox binary.

use std::io::Write;
use std::process::{Command, Output};

const PUZZLE: &str = r#"
width = 4
height = 4
min_balls = 1
max_balls = 2
balls = [[1, 2]]
moves = ["F0", "F1", "LC4", "T4,4", "T2,3", "R"]
"#;

fn puzzle_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    file.write_all(PUZZLE.as_bytes()).expect("Write puzzle");
    file
}

fn blackbox(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blackbox"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run blackbox")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "blackbox failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_play_skips_rejected_moves() {
    let file = puzzle_file();
    let path = file.path().to_str().expect("UTF-8 path");
    let out = stdout(&blackbox(&["play", "--puzzle", path, "--format", "json"]));

    let report: serde_json::Value = serde_json::from_str(&out).expect("JSON report");
    assert_eq!(report["phase"], "Revealed");
    assert!(report["outcome"]["Checked"]["consistent"].as_bool().expect("bool"));
    assert_eq!(report["rejected"].as_array().map(Vec::len), Some(1));
    assert!(report["rejected"][0].as_str().expect("string").starts_with("T4,4"));
    assert_eq!(report["exits"][0]["exit"]["PairedWith"], 14);
    assert_eq!(report["exits"][1]["exit"], "Hit");
}

#[test]
fn test_moves_flag_overrides_file_script() {
    let file = puzzle_file();
    let path = file.path().to_str().expect("UTF-8 path");
    let out = stdout(&blackbox(&["play", "-p", path, "-m", "F6"]));
    assert!(out.contains("  6 -> H"));
    assert!(out.contains("Guessing"));
}

#[test]
fn test_trace_fills_every_slot() {
    let file = puzzle_file();
    let path = file.path().to_str().expect("UTF-8 path");
    let out = stdout(&blackbox(&["trace", "--puzzle", path, "--format", "json"]));

    let report: serde_json::Value = serde_json::from_str(&out).expect("JSON report");
    let exits = report["exits"].as_array().expect("exit array");
    assert_eq!(exits.len(), 16);
    assert!(exits.iter().all(|row| row["exit"] != "Empty"));
}

#[test]
fn test_check_reports_counts() {
    let file = puzzle_file();
    let path = file.path().to_str().expect("UTF-8 path");
    let out = stdout(&blackbox(&["check", "--puzzle", path, "--guess", "1,1 2,3"]));
    assert!(out.contains("Inconsistent: 1 right, 1 wrong, 0 missed"));
}

#[test]
fn test_missing_puzzle_fails() {
    let output = blackbox(&["trace", "--puzzle", "/nonexistent/puzzle.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read puzzle file"));
}
