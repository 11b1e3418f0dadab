//! Change detection service
//!
//! Compares current content hashes against the deploy cache. Reads files but
//! never touches the cache; the caller decides when to persist `candidate`.

use tracing::trace;

use crate::domain::entities::{DeployCache, FileEntry};
use crate::domain::value_objects::ContentHash;
use crate::error::{UpsyncError, UpsyncResult};

/// Outcome of comparing a file set with the cache
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    /// Entries that are new or whose content differs from the cache
    pub changed: Vec<FileEntry>,
    /// Number of entries whose hash matches the cache exactly
    pub unchanged: usize,
    /// Fresh hashes for every entry; becomes the cache after a clean run
    pub candidate: DeployCache,
}

/// Partitions files into changed and unchanged by content hash
pub struct ChangeDetector;

impl ChangeDetector {
    /// Hash every entry and classify it against `cache`.
    ///
    /// Input order is preserved in `changed`.
    pub fn detect(entries: &[FileEntry], cache: &DeployCache) -> UpsyncResult<ChangeSet> {
        let mut result = ChangeSet::default();

        for entry in entries {
            let hash = ContentHash::of_file(entry.local_path()).map_err(|source| {
                UpsyncError::ReadFile {
                    path: entry.local_path().to_path_buf(),
                    source,
                }
            })?;

            if cache.matches(entry.relative_path(), &hash) {
                trace!(path = entry.relative_path(), "unchanged");
                result.unchanged += 1;
            } else {
                trace!(path = entry.relative_path(), "changed");
                result.changed.push(entry.clone());
            }
            result.candidate.insert(entry.relative_path(), hash);
        }

        Ok(result)
    }
}
