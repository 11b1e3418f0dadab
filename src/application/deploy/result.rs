//! Deploy Result
//!
//! Plan and outcome types for deploy operations.

use crate::domain::entities::{DeployCache, FileEntry};

/// What a run intends to upload, computed before connecting
#[derive(Debug, Clone, Default)]
pub struct DeployPlan {
    /// Files to upload, in upload order
    pub entries: Vec<FileEntry>,
    /// Number of files collected across all sources
    pub total: usize,
    /// Files skipped because their hash matches the cache
    pub unchanged: usize,
    /// Fresh cache to persist after a failure-free run (incremental mode only)
    pub candidate: Option<DeployCache>,
}

impl DeployPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tally of the transfer loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResult {
    pub uploaded: usize,
    pub failed: usize,
    /// Relative paths of the files that failed, in upload order
    pub failed_paths: Vec<String>,
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// What clean mode removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub removed_files: usize,
    pub removed_dirs: usize,
}

/// What happened to the deploy cache at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheUpdate {
    /// Cache replaced with this many entries
    Saved { entries: usize },
    /// Incremental mode was off
    Disabled,
    /// At least one transfer failed, cache left untouched
    SkippedAfterFailures,
    /// Writing the cache failed
    Failed(String),
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub upload: UploadResult,
    pub total: usize,
    pub unchanged: usize,
    /// Files that already existed remotely and were overwritten
    pub overwritten: usize,
    pub cleaned: Option<CleanStats>,
    pub cache: CacheUpdate,
}

/// Result of a deploy operation
#[derive(Debug, Clone)]
pub enum DeployOutcome {
    /// Uploads ran (possibly with per-file failures)
    Completed(DeployReport),
    /// Operator declined to overwrite; nothing was transferred
    Cancelled { existing: usize },
}
