//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::PathBuf;

use crate::domain::value_objects::{ExclusionSet, ExtraSource, RemotePath};

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Primary source directory (build output)
    pub source: PathBuf,
    /// Additional source roots merged into the deploy
    pub extra_sources: Vec<ExtraSource>,
    /// Files and directories never deployed
    pub exclusions: ExclusionSet,
    /// Destination root on the remote side
    pub remote_root: RemotePath,
    /// Cache file location; never collected even if inside a source root
    pub cache_file: Option<PathBuf>,
    /// Follow symbolic links while collecting
    pub follow_symlinks: bool,
    /// Suppress the overwrite confirmation
    pub unattended: bool,
    /// Upload only files whose hash differs from the cache
    pub incremental: bool,
    /// Wipe the remote root before uploading
    pub clean: bool,
}

impl DeployOptions {
    pub fn new(source: impl Into<PathBuf>, remote_root: RemotePath) -> Self {
        Self {
            source: source.into(),
            extra_sources: Vec::new(),
            exclusions: ExclusionSet::default(),
            remote_root,
            cache_file: None,
            follow_symlinks: false,
            unattended: false,
            incremental: false,
            clean: false,
        }
    }

    pub fn with_extra_sources(mut self, sources: Vec<ExtraSource>) -> Self {
        self.extra_sources = sources;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(path.into());
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_unattended(mut self, unattended: bool) -> Self {
        self.unattended = unattended;
        self
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }
}
