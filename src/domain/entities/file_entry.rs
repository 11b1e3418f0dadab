//! FileEntry entity - one local file scheduled for deployment
//!
//! The relative path is the identity of a file for remote addressing,
//! caching and exclusion matching.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Normalize a relative path to forward slashes (no leading `./` or `/`).
///
/// Backslashes are separators only on hosts that use them; elsewhere they
/// are part of the file name.
fn normalize_relative_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let raw = if MAIN_SEPARATOR == '\\' {
        raw.replace('\\', "/")
    } else {
        raw.into_owned()
    };
    raw.split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// A local file and where it lands relative to the remote root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    local_path: PathBuf,
    relative_path: String,
}

impl FileEntry {
    /// Create an entry; the relative path is normalized to `/` separators
    pub fn new(local_path: impl Into<PathBuf>, relative_path: impl AsRef<str>) -> Self {
        Self {
            local_path: local_path.into(),
            relative_path: normalize_relative_path(Path::new(relative_path.as_ref())),
        }
    }

    /// Get the local file path
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Get the forward-slash remote-relative path
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Final path segment
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}
