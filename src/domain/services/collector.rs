//! File collection service
//!
//! Walks a local source root and produces the flat list of files to deploy.
//! Excluded directories are pruned, never descended into.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::domain::entities::FileEntry;
use crate::domain::value_objects::ExclusionSet;

/// Enumerates deployable files under a root
#[derive(Debug, Clone, Default)]
pub struct FileCollector {
    exclusions: ExclusionSet,
    follow_symlinks: bool,
    skip_files: Vec<PathBuf>,
}

impl FileCollector {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            exclusions,
            follow_symlinks: false,
            skip_files: Vec::new(),
        }
    }

    /// Follow symbolic links. Link cycles are reported and skipped.
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Never collect this particular file (e.g. the deploy cache)
    pub fn with_skipped_file(mut self, path: &Path) -> Self {
        self.skip_files.push(absolute(path));
        self
    }

    /// Collect all files under `root`, relative paths rooted at the remote root
    pub fn collect(&self, root: &Path) -> Vec<FileEntry> {
        self.collect_with_prefix(root, "")
    }

    /// Collect all files under `root`, placing them under `prefix` remotely.
    ///
    /// A missing root yields an empty list; the caller decides whether that
    /// is fatal.
    pub fn collect_with_prefix(&self, root: &Path, prefix: &str) -> Vec<FileEntry> {
        let root = match root.canonicalize() {
            Ok(root) if root.is_dir() => root,
            Ok(_) => {
                warn!(root = %root.display(), "source is not a directory");
                return Vec::new();
            }
            Err(_) => {
                debug!(root = %root.display(), "source does not exist");
                return Vec::new();
            }
        };

        let exclusions = self.exclusions.clone();
        let filter_root = root.clone();
        let filter_prefix = prefix.to_string();

        let walker = WalkBuilder::new(&root)
            .standard_filters(false)
            .follow_links(self.follow_symlinks)
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let Some(rel) = relative_path(&filter_root, entry.path(), &filter_prefix) else {
                    return true;
                };
                let name = entry.file_name().to_string_lossy();
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let excluded = exclusions.is_excluded(&name, &rel, is_dir);
                if excluded {
                    debug!(path = %rel, "excluded");
                }
                !excluded
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if self.skip_files.iter().any(|skip| skip == entry.path()) {
                debug!(path = %entry.path().display(), "skipping reserved file");
                continue;
            }
            if let Some(rel) = relative_path(&root, entry.path(), prefix) {
                entries.push(FileEntry::new(entry.path(), rel));
            }
        }
        entries
    }
}

/// Build the `/`-joined relative path of `path` under `root`, with `prefix` prepended
fn relative_path(root: &Path, path: &Path, prefix: &str) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts: Vec<String> = Vec::new();
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }
    parts.extend(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    Some(parts.join("/"))
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
