//! Deploy command
//!
//! Resolves configuration, wires the infrastructure adapters into
//! `DeployUseCase` and reports the outcome.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use upsync::application::{CacheUpdate, DeployOptions, DeployOutcome, DeployPlan, DeployReport};
use upsync::config::{ConfigLoader, DeployConfig, LoadedConfig};
use upsync::domain::ports::DeployEventSink;
use upsync::infrastructure::{
    connector_for, JsonCacheStore, JsonEventSink, LogEventSink, TerminalConfirmer,
};
use upsync::DeployUseCase;

use crate::cli::Cli;

/// How the run ended, for the exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Everything uploaded (or nothing needed to be)
    Success,
    /// Operator declined the overwrite prompt
    Cancelled,
    /// Some transfers failed
    PartialFailure,
}

pub fn run(cli: &Cli) -> Result<RunStatus> {
    let project_dir = std::env::current_dir().context("cannot determine working directory")?;
    let loaded = load_config(cli, &project_dir)?;
    for warning in &loaded.warnings {
        eprintln!("Warning: {}", warning);
    }

    let config = &loaded.config;
    let options = deploy_options(config);
    debug!(?options, "deploy options");
    debug!(
        transport = %config.server.transport.kind(),
        root = %config.server.remote_root,
        "deploy target"
    );

    let use_case = DeployUseCase::new(
        connector_for(&config.server),
        JsonCacheStore::new(&config.cache_file),
    );

    if cli.deploy.dry_run {
        let plan = use_case.plan(&options)?;
        print_plan(&plan, config, cli.json);
        return Ok(RunStatus::Success);
    }

    let sink: Box<dyn DeployEventSink> = if cli.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(LogEventSink::stdout())
    };

    let outcome = use_case.execute(&options, &TerminalConfirmer::new(), sink.as_ref())?;
    match outcome {
        DeployOutcome::Cancelled { existing } => {
            info!(existing, "cancelled");
            Ok(RunStatus::Cancelled)
        }
        DeployOutcome::Completed(report) => {
            if !cli.json {
                print_report(&report);
            }
            if report.upload.is_success() {
                Ok(RunStatus::Success)
            } else {
                Ok(RunStatus::PartialFailure)
            }
        }
    }
}

fn load_config(cli: &Cli, project_dir: &Path) -> Result<LoadedConfig> {
    let mut loader = ConfigLoader::new(project_dir);
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path);
    }
    let loaded = loader.load(cli.deploy.to_layer())?;
    debug!(files = ?loaded.files, "configuration resolved");
    Ok(loaded)
}

/// Map resolved configuration onto use case options
pub fn deploy_options(config: &DeployConfig) -> DeployOptions {
    DeployOptions::new(config.source.clone(), config.server.remote_root.clone())
        .with_exclusions(config.exclusions.clone())
        .with_extra_sources(config.extra_sources.clone())
        .with_cache_file(config.cache_file.clone())
        .with_follow_symlinks(config.follow_symlinks)
        .with_unattended(config.unattended)
        .with_incremental(config.incremental)
        .with_clean(config.clean)
}

fn print_plan(plan: &DeployPlan, config: &DeployConfig, json: bool) {
    if json {
        let files: Vec<&str> = plan.entries.iter().map(|e| e.relative_path()).collect();
        println!(
            "{}",
            serde_json::json!({
                "event": "plan",
                "dry_run": true,
                "total": plan.total,
                "unchanged": plan.unchanged,
                "clean": config.clean,
                "files": files,
            })
        );
        return;
    }

    println!(
        "Dry run: {} of {} files would be uploaded to {}",
        plan.entries.len(),
        plan.total,
        config.server.remote_root
    );
    if config.clean {
        println!("  (destination would be cleaned first)");
    }
    for entry in &plan.entries {
        println!("  {}", entry.relative_path());
    }
    if plan.unchanged > 0 {
        println!("{} unchanged files skipped", plan.unchanged);
    }
}

fn print_report(report: &DeployReport) {
    if !report.upload.failed_paths.is_empty() {
        eprintln!("Failed uploads:");
        for path in &report.upload.failed_paths {
            eprintln!("  {}", path);
        }
    }
    match &report.cache {
        CacheUpdate::Saved { .. } | CacheUpdate::Disabled => {}
        CacheUpdate::SkippedAfterFailures => {
            eprintln!("Deploy cache not updated because some uploads failed");
        }
        CacheUpdate::Failed(err) => {
            eprintln!("Warning: could not save deploy cache: {}", err);
        }
    }
}
