//! Sequential transfer loop
//!
//! One file at a time, in plan order. A failed transfer is counted and
//! reported but never stops the queue; only a lost connection does.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::entities::FileEntry;
use crate::domain::ports::{DeployEvent, DeployEventSink, RemoteSession, SessionError};
use crate::domain::value_objects::RemotePath;

use super::result::UploadResult;

/// Connection lost partway through the queue
#[derive(Debug)]
pub struct UploadAborted {
    /// Tally up to the failure
    pub partial: UploadResult,
    pub path: RemotePath,
    pub source: SessionError,
}

/// Executes the transfer of a planned file list
pub struct Uploader<'a> {
    session: &'a dyn RemoteSession,
    remote_root: &'a RemotePath,
    events: &'a dyn DeployEventSink,
}

impl<'a> Uploader<'a> {
    pub fn new(
        session: &'a dyn RemoteSession,
        remote_root: &'a RemotePath,
        events: &'a dyn DeployEventSink,
    ) -> Self {
        Self {
            session,
            remote_root,
            events,
        }
    }

    /// Upload every entry in order and return the tally
    pub fn upload(&self, entries: &[FileEntry]) -> Result<UploadResult, UploadAborted> {
        let mut result = UploadResult::default();
        let mut ensured: HashSet<RemotePath> = HashSet::new();
        let total = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            let rel = entry.relative_path();
            let target = self.remote_root.join(rel);

            self.events.on_event(DeployEvent::FileStarted {
                index,
                total,
                path: rel.to_string(),
            });

            // Directory failures are tolerated; the transfer reports real problems.
            if let Some(parent) = target.parent() {
                if !ensured.contains(&parent) {
                    match self.session.ensure_dir(&parent) {
                        Ok(()) => {
                            ensured.insert(parent);
                        }
                        Err(err) => debug!(path = %parent, error = %err, "ensure_dir failed"),
                    }
                }
            }

            match self.session.transfer(entry.local_path(), &target) {
                Ok(()) => {
                    result.uploaded += 1;
                    self.events.on_event(DeployEvent::FileUploaded {
                        index,
                        path: rel.to_string(),
                    });
                }
                Err(err) if err.is_connection() => {
                    warn!(path = rel, error = %err, "connection lost during upload");
                    result.failed += 1;
                    result.failed_paths.push(rel.to_string());
                    self.events.on_event(DeployEvent::FileFailed {
                        index,
                        path: rel.to_string(),
                        error: err.to_string(),
                    });
                    return Err(UploadAborted {
                        partial: result,
                        path: target,
                        source: err,
                    });
                }
                Err(err) => {
                    warn!(path = rel, error = %err, "upload failed");
                    result.failed += 1;
                    result.failed_paths.push(rel.to_string());
                    self.events.on_event(DeployEvent::FileFailed {
                        index,
                        path: rel.to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(result)
    }
}
