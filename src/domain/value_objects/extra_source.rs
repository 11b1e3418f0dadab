//! Extra source roots
//!
//! Secondary local directories merged into the deploy next to the primary
//! source, each under its own remote prefix.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A secondary input root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtraSource {
    /// Bare path; the remote prefix mirrors the folder name
    Path(PathBuf),
    /// Explicit mapping from a local folder to a remote prefix
    Mapped { from: PathBuf, to: String },
}

impl ExtraSource {
    /// Local directory to collect from
    pub fn local_root(&self) -> &Path {
        match self {
            Self::Path(path) => path,
            Self::Mapped { from, .. } => from,
        }
    }

    /// Remote-relative prefix for every file from this source.
    ///
    /// Normalized to forward slashes without leading or trailing `/`.
    /// An empty prefix places files directly under the remote root.
    pub fn remote_prefix(&self) -> String {
        let raw = match self {
            Self::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Mapped { to, .. } => to.clone(),
        };
        raw.replace('\\', "/")
            .split('/')
            .filter(|seg| !seg.is_empty() && *seg != ".")
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Resolve a relative local root against a base directory
    pub fn resolved_against(&self, base: &Path) -> Self {
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };
        match self {
            Self::Path(path) => Self::Mapped {
                from: join(path),
                to: self.remote_prefix(),
            },
            Self::Mapped { from, to } => Self::Mapped {
                from: join(from),
                to: to.clone(),
            },
        }
    }
}
