//! Scenario: clean deploys
//!
//! Journey: the destination has drifted (stale files from old builds) and
//! the developer wants it to mirror the build exactly.

use crate::common::*;

#[test]
fn scenario_clean_leaves_exactly_the_build() {
    let env = TestEnv::new();
    env.write_remote("old.html", "stale");
    env.write_remote("legacy/deep/x.js", "stale");
    env.write_remote("index.html", "old home");
    env.write_source("index.html", "home");
    env.write_source("css/site.css", "body {}");

    let result = env.run(&["--clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Cleaned destination"), "{}", result.stdout);
    assert_eq!(env.remote_files(), paths(&["css/site.css", "index.html"]));
    assert!(!env.remote_path("legacy").exists());
    assert!(env.remote_root().exists());
    assert_eq!(env.read_remote("index.html"), "home");
}

#[test]
fn scenario_clean_uploads_unchanged_files_too() {
    let env = TestEnv::new();
    env.write_source("a.txt", "a");
    env.write_source("b.txt", "b");
    assert!(env.run(&[]).success);

    let result = env.run(&["--clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("2 uploaded"), "{}", result.stdout);
    assert_eq!(env.remote_files(), paths(&["a.txt", "b.txt"]));
}

#[cfg(unix)]
#[test]
fn scenario_clean_removes_backslash_named_files() {
    let env = TestEnv::new();
    env.write_remote("old\\stale.txt", "stale");
    env.write_source("index.html", "home");

    let result = env.run(&["--clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stdout.contains("removed 1 files and 0 directories"),
        "{}",
        result.stdout
    );
    assert!(!env.remote_path("old\\stale.txt").exists());
    assert_eq!(env.remote_files(), paths(&["index.html"]));
}
