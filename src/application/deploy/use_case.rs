//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. Collect local files and (incremental mode) filter unchanged ones
//! 2. Connect
//! 3. Clean the destination (clean mode) or discover files that already exist
//! 4. Confirm overwrites unless unattended
//! 5. Upload sequentially
//! 6. Close the session and update the cache
//!
//! The use case is parameterized by its ports so tests can swap in
//! in-memory sessions and cache stores.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::entities::{DeployCache, FileEntry};
use crate::domain::ports::{
    CacheStore, DeployEvent, DeployEventSink, OverwriteConfirmer, OverwritePrompt, RemoteSession,
    SessionConnector,
};
use crate::domain::services::{ChangeDetector, FileCollector};
use crate::error::{UpsyncError, UpsyncResult};

use super::clean::clean_destination;
use super::options::DeployOptions;
use super::result::{CacheUpdate, CleanStats, DeployOutcome, DeployPlan, DeployReport, UploadResult};
use super::uploader::Uploader;

/// What happened while the session was open
enum SessionOutcome {
    Cancelled { existing: usize },
    Uploaded {
        upload: UploadResult,
        overwritten: usize,
        cleaned: Option<CleanStats>,
    },
}

/// Deploy use case - plans and executes a deployment
pub struct DeployUseCase<C, S>
where
    C: SessionConnector,
    S: CacheStore,
{
    connector: C,
    cache_store: S,
}

impl<C, S> DeployUseCase<C, S>
where
    C: SessionConnector,
    S: CacheStore,
{
    pub fn new(connector: C, cache_store: S) -> Self {
        Self {
            connector,
            cache_store,
        }
    }

    /// Collect files and decide what to upload. Never touches the network.
    pub fn plan(&self, options: &DeployOptions) -> UpsyncResult<DeployPlan> {
        if !options.source.is_dir() {
            return Err(UpsyncError::SourceNotFound {
                path: options.source.clone(),
            });
        }

        let entries = self.collect(options);
        let total = entries.len();

        if !options.incremental {
            return Ok(DeployPlan {
                entries,
                total,
                unchanged: 0,
                candidate: None,
            });
        }

        let cache = self.cache_store.load();
        debug!(cached = cache.len(), "loaded deploy cache");
        let changes = ChangeDetector::detect(&entries, &cache)?;

        // After a wipe nothing is left remotely, so everything goes up again.
        let (to_upload, unchanged) = if options.clean {
            (entries, 0)
        } else {
            (changes.changed, changes.unchanged)
        };

        Ok(DeployPlan {
            entries: to_upload,
            total,
            unchanged,
            candidate: Some(changes.candidate),
        })
    }

    /// Plan and execute a deployment
    pub fn execute(
        &self,
        options: &DeployOptions,
        confirmer: &dyn OverwriteConfirmer,
        events: &dyn DeployEventSink,
    ) -> UpsyncResult<DeployOutcome> {
        let plan = self.plan(options)?;
        self.execute_plan(plan, options, confirmer, events)
    }

    /// Execute a previously computed plan
    pub fn execute_plan(
        &self,
        plan: DeployPlan,
        options: &DeployOptions,
        confirmer: &dyn OverwriteConfirmer,
        events: &dyn DeployEventSink,
    ) -> UpsyncResult<DeployOutcome> {
        events.on_event(DeployEvent::Planned {
            total: plan.total,
            to_upload: plan.entries.len(),
            unchanged: plan.unchanged,
        });

        let session_outcome = if plan.is_empty() && !options.clean {
            info!("nothing to upload");
            SessionOutcome::Uploaded {
                upload: UploadResult::default(),
                overwritten: 0,
                cleaned: None,
            }
        } else {
            let destination = self.connector.destination();
            let mut session =
                self.connector
                    .connect()
                    .map_err(|source| UpsyncError::Connect {
                        destination: destination.clone(),
                        source,
                    })?;
            info!(destination = %destination, "connected");
            events.on_event(DeployEvent::Connected {
                destination: destination.clone(),
            });

            let outcome =
                self.run_session(session.as_ref(), &destination, &plan, options, confirmer, events);

            if let Err(err) = session.close() {
                warn!(error = %err, "failed to close session");
            }
            outcome?
        };

        match session_outcome {
            SessionOutcome::Cancelled { existing } => {
                info!(existing, "deploy cancelled by operator");
                events.on_event(DeployEvent::Cancelled);
                Ok(DeployOutcome::Cancelled { existing })
            }
            SessionOutcome::Uploaded {
                upload,
                overwritten,
                cleaned,
            } => {
                let cache = self.update_cache(plan.candidate.as_ref(), &upload);
                events.on_event(DeployEvent::Completed {
                    uploaded: upload.uploaded,
                    failed: upload.failed,
                    unchanged: plan.unchanged,
                });
                Ok(DeployOutcome::Completed(DeployReport {
                    upload,
                    total: plan.total,
                    unchanged: plan.unchanged,
                    overwritten,
                    cleaned,
                    cache,
                }))
            }
        }
    }

    /// Clean or discover, confirm, upload. The caller closes the session.
    fn run_session(
        &self,
        session: &dyn RemoteSession,
        destination: &str,
        plan: &DeployPlan,
        options: &DeployOptions,
        confirmer: &dyn OverwriteConfirmer,
        events: &dyn DeployEventSink,
    ) -> UpsyncResult<SessionOutcome> {
        let root = &options.remote_root;

        let cleaned = if options.clean {
            let stats = clean_destination(session, root)
                .map_err(|(path, source)| UpsyncError::Remote {
                    path: path.to_string(),
                    source,
                })?;
            events.on_event(DeployEvent::Cleaned {
                removed_files: stats.removed_files,
                removed_dirs: stats.removed_dirs,
            });
            Some(stats)
        } else {
            None
        };

        let mut overwritten = 0;
        if cleaned.is_none() {
            let existing = Self::discover_existing(session, options, &plan.entries)?;
            if !existing.is_empty() {
                events.on_event(DeployEvent::ExistingFound {
                    count: existing.len(),
                });

                if options.unattended {
                    info!(count = existing.len(), "unattended: overwriting existing files");
                } else {
                    let prompt = OverwritePrompt {
                        destination,
                        existing: &existing,
                    };
                    if !confirmer.confirm_overwrite(&prompt)? {
                        return Ok(SessionOutcome::Cancelled {
                            existing: existing.len(),
                        });
                    }
                }
                overwritten = existing.len();
            }
        }

        let upload = Uploader::new(session, root, events)
            .upload(&plan.entries)
            .map_err(|aborted| {
                warn!(
                    uploaded = aborted.partial.uploaded,
                    failed = aborted.partial.failed,
                    "upload aborted"
                );
                UpsyncError::Remote {
                    path: aborted.path.to_string(),
                    source: aborted.source,
                }
            })?;

        Ok(SessionOutcome::Uploaded {
            upload,
            overwritten,
            cleaned,
        })
    }

    /// Relative paths of planned files that already exist remotely.
    ///
    /// A failed check that is not a connection loss counts as "exists" so the
    /// operator still gets asked.
    fn discover_existing(
        session: &dyn RemoteSession,
        options: &DeployOptions,
        entries: &[FileEntry],
    ) -> UpsyncResult<Vec<String>> {
        let mut existing = Vec::new();
        for entry in entries {
            let target = options.remote_root.join(entry.relative_path());
            match session.exists(&target) {
                Ok(true) => existing.push(entry.relative_path().to_string()),
                Ok(false) => {}
                Err(err) if err.is_connection() => {
                    return Err(UpsyncError::Remote {
                        path: target.to_string(),
                        source: err,
                    });
                }
                Err(err) => {
                    warn!(path = %target, error = %err, "existence check failed, assuming present");
                    existing.push(entry.relative_path().to_string());
                }
            }
        }
        Ok(existing)
    }

    fn update_cache(&self, candidate: Option<&DeployCache>, upload: &UploadResult) -> CacheUpdate {
        let Some(candidate) = candidate else {
            return CacheUpdate::Disabled;
        };
        if !upload.is_success() {
            info!(failed = upload.failed, "transfers failed, cache not updated");
            return CacheUpdate::SkippedAfterFailures;
        }
        match self.cache_store.save(candidate) {
            Ok(()) => CacheUpdate::Saved {
                entries: candidate.len(),
            },
            Err(err) => {
                warn!(error = %err, "failed to save deploy cache");
                CacheUpdate::Failed(err.to_string())
            }
        }
    }

    /// Primary source plus extra sources; a later source wins on path clashes
    fn collect(&self, options: &DeployOptions) -> Vec<FileEntry> {
        let mut collector = FileCollector::new(options.exclusions.clone())
            .with_follow_symlinks(options.follow_symlinks);
        if let Some(cache_file) = &options.cache_file {
            collector = collector.with_skipped_file(cache_file);
        }

        let mut entries = collector.collect(&options.source);
        let mut index: HashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.relative_path().to_string(), i))
            .collect();

        for extra in &options.extra_sources {
            let root = extra.local_root();
            if !root.is_dir() {
                warn!(path = %root.display(), "extra source not found, skipping");
                continue;
            }
            for entry in collector.collect_with_prefix(root, &extra.remote_prefix()) {
                match index.get(entry.relative_path()) {
                    Some(&i) => {
                        warn!(
                            path = entry.relative_path(),
                            from = %root.display(),
                            "duplicate path, extra source wins"
                        );
                        entries[i] = entry;
                    }
                    None => {
                        index.insert(entry.relative_path().to_string(), entries.len());
                        entries.push(entry);
                    }
                }
            }
        }

        debug!(count = entries.len(), "collected files");
        entries
    }
}
