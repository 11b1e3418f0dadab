//! Scenario: first deploy of a fresh build
//!
//! Journey: a developer builds a site into `dist/` and deploys it to an
//! empty destination for the first time.

use crate::common::*;

#[test]
fn scenario_first_deploy_uploads_everything() {
    let env = TestEnv::new();
    env.write_source("index.html", "<h1>hi</h1>");
    env.write_source("css/site.css", "body {}");
    env.write_source("js/app.js", "console.log(1)");

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(
        env.remote_files(),
        paths(&["css/site.css", "index.html", "js/app.js"])
    );
    assert_eq!(env.read_remote("css/site.css"), "body {}");
    assert!(result.stdout.contains("[1/3]"), "{}", result.stdout);
    assert!(result.stdout.contains("3 uploaded, 0 failed"), "{}", result.stdout);
}

#[test]
fn scenario_exclusions_keep_maps_and_drafts_local() {
    let env = TestEnv::with_config(
        "[deploy]\nexclude = [\"*.map\", \"drafts\", \".DS_Store\"]\n",
    );
    env.write_source("app.js", "js");
    env.write_source("app.js.map", "map");
    env.write_source(".DS_Store", "junk");
    env.write_source("drafts/post.html", "wip");
    env.write_source("posts/drafts.html", "kept: only directories named drafts go");

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.remote_files(), paths(&["app.js", "posts/drafts.html"]));
}

#[test]
fn scenario_extra_sources_are_merged() {
    let env = TestEnv::with_config(
        "[deploy]\nextra_sources = [\"public\", { from = \"docs/build\", to = \"docs\" }]\n",
    );
    env.write_source("index.html", "home");
    std::fs::create_dir_all(env.project_path("public")).unwrap();
    std::fs::write(env.project_path("public/logo.svg"), "<svg/>").unwrap();
    std::fs::create_dir_all(env.project_path("docs/build/guide")).unwrap();
    std::fs::write(env.project_path("docs/build/guide/index.html"), "guide").unwrap();

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(
        env.remote_files(),
        paths(&["docs/guide/index.html", "index.html", "public/logo.svg"])
    );
}

#[test]
fn scenario_dry_run_touches_nothing() {
    let env = TestEnv::new();
    env.write_source("index.html", "home");

    let result = env.run(&["--dry-run"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("index.html"), "{}", result.stdout);
    assert!(env.remote_files().is_empty());
    assert!(env.read_cache().is_none());
}

#[test]
fn scenario_json_mode_emits_ndjson() {
    let env = TestEnv::new();
    env.write_source("a.txt", "a");

    let result = env.run(&["--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();
    assert_eq!(events.first().unwrap()["event"], "planned");
    assert_eq!(events.last().unwrap()["event"], "complete");
    assert_eq!(events.last().unwrap()["status"], "success");
}

#[cfg(unix)]
#[test]
fn scenario_backslash_names_are_uploaded_verbatim() {
    let env = TestEnv::new();
    env.write_source("a\\b.txt", "backslash");
    env.write_source("a/b.txt", "nested");

    let result = env.run(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read_remote("a\\b.txt"), "backslash");
    assert_eq!(env.read_remote("a/b.txt"), "nested");
    let cache = env.read_cache().unwrap();
    assert_eq!(cache.as_object().unwrap().len(), 2);
}
