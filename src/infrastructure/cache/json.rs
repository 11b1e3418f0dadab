//! JSON Cache Store
//!
//! Implements the CacheStore port as a flat JSON object:
//!
//! ```json
//! {
//!   "css/site.css": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!   "index.html": "..."
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::entities::DeployCache;
use crate::domain::ports::{CacheError, CacheStore};
use crate::domain::value_objects::ContentHash;

/// Deploy cache stored as pretty-printed JSON with sorted keys
#[derive(Debug, Clone)]
pub struct JsonCacheStore {
    path: PathBuf,
}

impl JsonCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<DeployCache, String> {
        let content = fs::read_to_string(&self.path).map_err(|e| e.to_string())?;
        parse_cache(&content).map_err(|e| e.to_string())
    }
}

/// Parse cache file content. Entries with malformed hashes are dropped.
pub fn parse_cache(content: &str) -> Result<DeployCache, serde_json::Error> {
    let raw: BTreeMap<String, String> = serde_json::from_str(content)?;

    let mut cache = DeployCache::new();
    for (path, hex) in raw {
        let hash = ContentHash::new(hex);
        if hash.is_well_formed() {
            cache.insert(path, hash);
        } else {
            debug!(path = %path, "dropping malformed cache entry");
        }
    }
    Ok(cache)
}

impl CacheStore for JsonCacheStore {
    fn load(&self) -> DeployCache {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no deploy cache yet");
            return DeployCache::new();
        }
        match self.read() {
            Ok(cache) => cache,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable deploy cache");
                DeployCache::new()
            }
        }
    }

    fn save(&self, cache: &DeployCache) -> Result<(), CacheError> {
        let raw: BTreeMap<&str, &str> = cache
            .entries()
            .map(|(path, hash)| (path, hash.as_str()))
            .collect();
        let mut content =
            serde_json::to_string_pretty(&raw).map_err(|e| CacheError::Serialize(e.to_string()))?;
        content.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        // Same directory as the target so the rename never crosses filesystems
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| CacheError::Io(io::Error::from(e)))?;

        debug!(path = %self.path.display(), entries = cache.len(), "deploy cache saved");
        Ok(())
    }
}
