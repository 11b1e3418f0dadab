//! Scenario: configuration and local errors
//!
//! Every fatal problem exits with status 1 before anything is uploaded.

use crate::common::*;

#[test]
fn scenario_missing_source_directory() {
    let env = TestEnv::new();
    std::fs::remove_dir(env.project_path("dist")).unwrap();

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stderr.contains("source directory not found"), "{}", result.stderr);
}

#[test]
fn scenario_missing_remote_root() {
    let env = TestEnv::new();
    std::fs::write(env.project_path("upsync.toml"), "[server]\ntransport = \"local\"\n").unwrap();
    env.write_source("a.txt", "a");

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stderr.contains("remote_root"), "{}", result.stderr);
    assert!(env.remote_files().is_empty());
}

#[test]
fn scenario_unknown_key_warns_with_suggestion() {
    let env = TestEnv::with_config("[deploy]\nsorce = \"dist\"\n");
    env.write_source("a.txt", "a");

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("unknown config key"), "{}", result.stderr);
    assert!(result.stderr.contains("did you mean 'source'"), "{}", result.stderr);
}

#[test]
fn scenario_json_mode_reports_errors_as_events() {
    let env = TestEnv::new();
    std::fs::remove_dir(env.project_path("dist")).unwrap();

    let result = env.run(&["--json"]);

    assert_eq!(result.exit_code, 1);
    let event: serde_json::Value = serde_json::from_str(result.stdout.trim()).unwrap();
    assert_eq!(event["event"], "error");
}

#[test]
fn scenario_full_and_incremental_conflict() {
    let env = TestEnv::new();

    let result = env.run(&["--full", "--incremental"]);

    assert!(!result.success);
    assert!(result.stderr.contains("cannot be used with"), "{}", result.stderr);
}
