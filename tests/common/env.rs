//! Test environment for isolated upsync runs.
//!
//! `TestEnv` owns three temp directories: the project (with `dist/` and
//! `upsync.toml`), a fake HOME, and the "remote" directory that the local
//! transport deploys into.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Result of running the upsync binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project + home + destination
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    pub remote_dir: TempDir,
    upsync_bin: PathBuf,
}

impl TestEnv {
    /// Project with an empty `dist/` and a local-transport `upsync.toml`
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Like `new`, with extra TOML appended after the `[server]` section
    pub fn with_config(extra: &str) -> Self {
        let env = Self {
            project_root: TempDir::new().expect("project tempdir"),
            home_dir: TempDir::new().expect("home tempdir"),
            remote_dir: TempDir::new().expect("remote tempdir"),
            upsync_bin: PathBuf::from(env!("CARGO_BIN_EXE_upsync")),
        };
        std::fs::create_dir_all(env.project_path("dist")).expect("create dist");
        env.write_config(extra);
        env
    }

    /// Replace `upsync.toml`
    pub fn write_config(&self, extra: &str) {
        let config = format!(
            "[server]\ntransport = \"local\"\nremote_root = \"{}\"\n\n{}\n",
            self.remote_root().display(),
            extra
        );
        std::fs::write(self.project_path("upsync.toml"), config).expect("write config");
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn remote_root(&self) -> &Path {
        self.remote_dir.path()
    }

    pub fn remote_path(&self, relative: &str) -> PathBuf {
        self.remote_root().join(relative)
    }

    /// Write a file under `dist/`
    pub fn write_source(&self, relative: &str, content: &str) {
        write_file(&self.project_path("dist").join(relative), content);
    }

    /// Write a file directly into the destination
    pub fn write_remote(&self, relative: &str, content: &str) {
        write_file(&self.remote_path(relative), content);
    }

    pub fn read_remote(&self, relative: &str) -> String {
        std::fs::read_to_string(self.remote_path(relative))
            .unwrap_or_else(|e| panic!("failed to read remote {}: {}", relative, e))
    }

    /// All files under the destination, as `/`-joined relative paths
    pub fn remote_files(&self) -> BTreeSet<String> {
        let mut files = BTreeSet::new();
        collect_files(self.remote_root(), self.remote_root(), &mut files);
        files
    }

    /// Parsed deploy cache, if present
    pub fn read_cache(&self) -> Option<serde_json::Value> {
        let content = std::fs::read_to_string(self.project_path(".upsync-cache.json")).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Run upsync from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run upsync from the project root with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.upsync_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("RUST_LOG")
            .stdin(Stdio::null());

        for (key, _) in std::env::vars() {
            if key.starts_with("UPSYNC_") {
                cmd.env_remove(key);
            }
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute upsync");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directories");
    }
    std::fs::write(path, content).expect("write file");
}

fn collect_files(root: &Path, dir: &Path, out: &mut BTreeSet<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else if let Ok(rel) = path.strip_prefix(root) {
            let rel: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.insert(rel.join("/"));
        }
    }
}
