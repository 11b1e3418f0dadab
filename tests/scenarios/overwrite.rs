//! Scenario: overwriting files that already exist remotely
//!
//! Journey: someone deploys into a destination that already has content.
//! Without a terminal, upsync refuses unless `--yes` was given.

use crate::common::*;

#[test]
fn scenario_existing_files_without_terminal_fail() {
    let env = TestEnv::new();
    env.write_remote("index.html", "old");
    env.write_source("index.html", "new");

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stderr.contains("--yes"), "{}", result.stderr);
    assert_eq!(env.read_remote("index.html"), "old");
    assert!(env.read_cache().is_none());
}

#[test]
fn scenario_yes_overwrites_existing_files() {
    let env = TestEnv::new();
    env.write_remote("index.html", "old");
    env.write_remote("about.html", "old");
    env.write_source("index.html", "new");
    env.write_source("about.html", "new");
    env.write_source("contact.html", "new");

    let result = env.run(&["--yes"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stdout.contains("2 files already exist"),
        "{}",
        result.stdout
    );
    assert_eq!(env.read_remote("index.html"), "new");
    assert_eq!(env.read_remote("about.html"), "new");
    assert_eq!(env.read_remote("contact.html"), "new");
}

#[test]
fn scenario_unattended_from_config() {
    let env = TestEnv::with_config("[mode]\nunattended = true\n");
    env.write_remote("index.html", "old");
    env.write_source("index.html", "new");

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read_remote("index.html"), "new");
}
