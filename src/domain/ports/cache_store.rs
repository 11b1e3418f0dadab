//! CacheStore port - abstraction for deploy cache persistence
//!
//! The cache records the content hash of every file in the last fully
//! successful deploy. Loading never fails: a missing or corrupt cache
//! just means "nothing deployed yet".

use crate::domain::entities::DeployCache;

/// Cache persistence errors
#[derive(Debug)]
pub enum CacheError {
    /// Serialization failed
    Serialize(String),
    /// I/O error while writing
    Io(std::io::Error),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::Serialize(msg) => write!(f, "Failed to serialize cache: {}", msg),
            CacheError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Io(err)
    }
}

/// Abstract store for the deploy cache
pub trait CacheStore {
    /// Load the cache; absent or unparsable content yields an empty cache
    fn load(&self) -> DeployCache;

    /// Replace the persisted cache. Readers never observe a partial write.
    fn save(&self, cache: &DeployCache) -> Result<(), CacheError>;
}
