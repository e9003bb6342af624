//! Robot-mode end-to-end tests.

use mockup::frames::Orientation;
use tempfile::TempDir;

use crate::common::cli::{parse_json, CliRunner};
use crate::common::fixtures::{write_screenshot, TestFrames, FRAME_SIZE};
use crate::common::init_test_logging;

#[test]
fn robot_quick_start_outputs_json() {
    init_test_logging();
    let output = CliRunner::new().command().arg("--robot").assert().success();

    let json = parse_json(&output.get_output().stdout);
    assert_eq!(json["tool"], "mockup");
    assert!(json["commands"]["generate"].is_string());
    assert!(json.get("output_modes").is_some());
}

#[test]
fn robot_models_lists_catalog() {
    init_test_logging();
    let output = CliRunner::new()
        .command()
        .args(["models", "--robot"])
        .assert()
        .success();

    let json = parse_json(&output.get_output().stdout);
    let models = json["models"].as_object().unwrap();
    assert_eq!(models.len(), 8);
    assert_eq!(models["iPhone 16 Plus"]["series"], "16");
}

#[test]
fn robot_detect_reports_model() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let shot = write_screenshot(dir.path(), "shot.png", 1179, 2556);

    let output = CliRunner::new()
        .command()
        .arg("--robot")
        .arg("detect")
        .arg(&shot)
        .assert()
        .success();

    let json = parse_json(&output.get_output().stdout);
    assert_eq!(json["detected_model"], "iPhone 16");
    assert_eq!(json["resolution"], serde_json::json!([1179, 2556]));
    assert_eq!(json["all_matches"], serde_json::json!(["iPhone 16", "iPhone 16 Plus"]));
}

#[test]
fn robot_detect_failure_writes_error_json_to_stderr() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let shot = write_screenshot(dir.path(), "square.png", 300, 300);

    let output = CliRunner::new()
        .command()
        .arg("--robot")
        .arg("detect")
        .arg(&shot)
        .assert()
        .failure()
        .code(1);

    let json = parse_json(&output.get_output().stderr);
    assert_eq!(json["error"], true);
    assert_eq!(json["recoverable"], true);
    assert!(json["suggestion"].is_string());
    assert!(output.get_output().stdout.is_empty());
}

#[test]
fn robot_generate_writes_file_and_summary() {
    init_test_logging();
    let frames = TestFrames::new().with("iPhone 17", "Sage", Orientation::Portrait);
    let work = TempDir::new().unwrap();
    let shot = write_screenshot(work.path(), "shot.png", 603, 1311);
    let out = work.path().join("framed.png");

    let runner = CliRunner::new();
    let output = runner
        .with_frames(frames.path())
        .args(["--format", "json-compact", "generate"])
        .arg(&shot)
        .args(["--color", "Sage", "-o"])
        .arg(&out)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    assert_eq!(stdout.trim().lines().count(), 1);
    let json = parse_json(stdout.as_bytes());
    assert_eq!(json["model"], "iPhone 17");
    assert_eq!(json["orientation"], "Portrait");

    let written = image::open(&out).unwrap();
    assert_eq!((written.width(), written.height()), FRAME_SIZE);
}

#[test]
fn robot_version_is_json() {
    init_test_logging();
    let output = CliRunner::new()
        .command()
        .args(["version", "--format=json"])
        .assert()
        .success();

    let json = parse_json(&output.get_output().stdout);
    assert_eq!(json["name"], "mockup");
    assert!(json["version"].is_string());
}
