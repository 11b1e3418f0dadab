//! Scenario: incremental re-deploys
//!
//! Journey: the developer rebuilds, changes one page and deploys again.
//! Only the changed file travels; the cache records every hash.

use crate::common::*;

#[test]
fn scenario_rerun_without_changes_uploads_nothing() {
    let env = TestEnv::new();
    env.write_source("a.txt", "a");
    env.write_source("b/c.txt", "c");

    let first = env.run(&[]);
    assert!(first.success, "{}", first.combined_output());
    let cache = env.read_cache().expect("cache written after first deploy");
    assert_eq!(cache.as_object().unwrap().len(), 2);

    // Remove a remote file; an unchanged local copy must not be re-sent
    std::fs::remove_file(env.remote_path("a.txt")).unwrap();

    let second = env.run(&[]);
    assert!(second.success, "{}", second.combined_output());
    assert!(!second.stdout.contains("[1/"), "{}", second.stdout);
    assert!(!env.remote_path("a.txt").exists());
    assert_eq!(env.read_cache().unwrap(), cache);
}

#[test]
fn scenario_changed_file_is_the_only_upload() {
    let env = TestEnv::new();
    env.write_source("a.txt", "a");
    env.write_source("b.txt", "b");
    assert!(env.run(&[]).success);

    env.write_source("b.txt", "b2");
    env.write_source("new.txt", "n");
    // The changed file already exists remotely, so confirm the overwrite
    let result = env.run(&["--yes"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("2 of 3 files to upload"), "{}", result.stdout);
    assert_eq!(env.read_remote("b.txt"), "b2");
    assert_eq!(env.remote_files(), paths(&["a.txt", "b.txt", "new.txt"]));

    let cache = env.read_cache().unwrap();
    let keys: Vec<&String> = cache.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["a.txt", "b.txt", "new.txt"]);
}

#[test]
fn scenario_full_flag_ignores_cache() {
    let env = TestEnv::new();
    env.write_source("a.txt", "a");
    assert!(env.run(&[]).success);

    let result = env.run(&["--full", "--yes"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("[1/1] a.txt"), "{}", result.stdout);
}

#[test]
fn scenario_failed_upload_keeps_old_cache_and_strict_exits_2() {
    let env = TestEnv::new();
    env.write_source("index.html", "home");
    assert!(env.run(&[]).success);
    let cache_before = env.read_cache().unwrap();

    // A plain file where the destination needs a directory
    env.write_remote("img", "not a directory");
    env.write_source("img/a.png", "png");
    env.write_source("about.html", "about");

    let lenient = env.run(&[]);
    assert_eq!(lenient.exit_code, 0, "{}", lenient.combined_output());
    assert!(lenient.stderr.contains("img/a.png"), "{}", lenient.stderr);
    assert!(lenient.stderr.contains("cache not updated"), "{}", lenient.stderr);
    assert_eq!(env.read_cache().unwrap(), cache_before);

    let strict = env.run(&["--strict", "--yes"]);
    assert_eq!(strict.exit_code, 2, "{}", strict.combined_output());
    assert_eq!(env.read_cache().unwrap(), cache_before);
    assert_eq!(env.read_remote("about.html"), "about");
}

#[test]
fn scenario_env_override_selects_source() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.project_path("build")).unwrap();
    std::fs::write(env.project_path("build/page.html"), "page").unwrap();
    env.write_source("ignored.html", "dist");

    let result = env.run_with_env(&[], &[("UPSYNC_SOURCE", "build")]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.remote_files(), paths(&["page.html"]));
}

#[test]
fn scenario_invalid_env_value_warns_and_falls_back() {
    let env = TestEnv::new();
    env.write_source("a.txt", "a");

    let result = env.run_with_env(&[], &[("UPSYNC_INCREMENTAL", "maybe")]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stderr.contains("Invalid UPSYNC_INCREMENTAL value 'maybe'"),
        "{}",
        result.stderr
    );
    assert!(env.read_cache().is_some());
}
