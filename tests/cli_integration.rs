use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

#[path = "integration/fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::TestFixture;

fn run_longform(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_longform"))
        .args(args)
        .arg("--no-progress")
        .output()
        .expect("Failed to run longform")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

/// Test that --stats-out creates a JSON file with the expected structure
#[test]
fn test_stats_output_json_structure() {
    let fixture = TestFixture::new();
    fixture.create_document("proposal.txt", PROPOSAL_TEXT);
    let stats_file = fixture.root_path.join("test_stats.json");

    let output = run_longform(&[
        path_arg(&fixture.root_path),
        "--stats-out",
        path_arg(&stats_file),
    ]);
    assert!(output.status.success(), "longform failed: {}", String::from_utf8_lossy(&output.stderr));

    let stats: Value = serde_json::from_str(&fs::read_to_string(&stats_file).unwrap())
        .expect("Failed to parse JSON");
    let obj = stats.as_object().expect("Stats should be a JSON object");
    for key in [
        "run_start",
        "total_processing_time_ms",
        "total_chars_processed",
        "total_abbreviations_resolved",
        "document_stats",
    ] {
        assert!(obj.contains_key(key), "Missing {key} field");
    }

    let documents = obj["document_stats"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["status"], "success");
    assert!(documents[0]["abbreviations_detected"].as_u64().unwrap() > 0);
}

/// JSON output maps each document to its abbreviations
#[test]
fn test_json_output_format() {
    let fixture = TestFixture::new();
    let file_path = fixture.create_document("simple.txt", SIMPLE_TEXT);

    let output = run_longform(&[
        path_arg(&file_path),
        "--format",
        "json",
        "--stats-out",
        path_arg(&fixture.stats_path()),
    ]);
    assert!(output.status.success(), "longform failed: {}", String::from_utf8_lossy(&output.stderr));

    let printed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let key = file_path.display().to_string();
    assert_eq!(printed[&key]["RMF"], "Risk Management Framework");
    assert_eq!(printed[&key]["A&A"], "Assessment and Authorization");

    assert!(fixture.read_output(&file_path).unwrap().contains("List of Abbreviations"));
}

/// A configuration file and flags both feed the resolver
#[test]
fn test_config_file_with_flag_override() {
    let fixture = TestFixture::new();
    let file_path = fixture.create_document("navy.txt", NAVY_TEXT);
    let config_path = fixture.root_path.join("resolver.json");
    fs::write(&config_path, r#"{"threshold": 100}"#).unwrap();

    let output = run_longform(&[
        path_arg(&file_path),
        "--config",
        path_arg(&config_path),
        "--no-fallback",
        "--format",
        "json",
        "--stats-out",
        path_arg(&fixture.stats_path()),
    ]);
    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(printed[&file_path.display().to_string()]["DON"].is_null());

    let output = run_longform(&[
        path_arg(&file_path),
        "--config",
        path_arg(&config_path),
        "--threshold",
        "80",
        "--no-fallback",
        "--overwrite-all",
        "--format",
        "json",
        "--stats-out",
        path_arg(&fixture.stats_path()),
    ]);
    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed[&file_path.display().to_string()]["DON"], "Department of the Navy");
}

/// --fail-fast turns a per-document failure into a non-zero exit
#[test]
fn test_fail_fast_exit_status() {
    let fixture = TestFixture::new();
    fixture.create_document("valid.txt", SIMPLE_TEXT);
    fixture.create_raw_document("invalid.txt", &[0xFF, 0xFE, 0xFD]);

    let output = run_longform(&[
        path_arg(&fixture.root_path),
        "--stats-out",
        path_arg(&fixture.stats_path()),
    ]);
    assert!(output.status.success(), "Command should succeed without --fail-fast");

    let output = run_longform(&[
        path_arg(&fixture.root_path),
        "--fail-fast",
        "--overwrite-all",
        "--stats-out",
        path_arg(&fixture.stats_path()),
    ]);
    assert!(!output.status.success(), "Command should fail with --fail-fast");
}

/// Missing inputs are rejected before any processing
#[test]
fn test_missing_input_rejected() {
    let fixture = TestFixture::new();
    let output = run_longform(&[path_arg(&fixture.root_path.join("nope.txt"))]);
    assert!(!output.status.success());
}
