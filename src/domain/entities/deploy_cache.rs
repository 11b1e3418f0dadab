//! DeployCache entity - hashes of the last successful deploy
//!
//! A pure data structure; loading and saving go through `CacheStore`.

use std::collections::BTreeMap;

use crate::domain::value_objects::ContentHash;

/// Mapping from relative path to content hash
///
/// Keys are unique by construction; inserting an existing path replaces its hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployCache {
    entries: BTreeMap<String, ContentHash>,
}

impl DeployCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached hash for a relative path
    pub fn get(&self, relative_path: &str) -> Option<&ContentHash> {
        self.entries.get(relative_path)
    }

    /// Record a hash, replacing any previous one for the same path
    pub fn insert(&mut self, relative_path: impl Into<String>, hash: ContentHash) {
        self.entries.insert(relative_path.into(), hash);
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.entries.contains_key(relative_path)
    }

    /// Whether the cached hash for `relative_path` equals `hash`
    pub fn matches(&self, relative_path: &str, hash: &ContentHash) -> bool {
        self.get(relative_path) == Some(hash)
    }

    /// Iterate entries in path order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ContentHash)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ContentHash)> for DeployCache {
    fn from_iter<T: IntoIterator<Item = (String, ContentHash)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
