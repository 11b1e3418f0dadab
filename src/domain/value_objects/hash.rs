//! Content Hash Value Object
//!
//! A SHA-256 digest of a file's full content, used for change detection
//! in the deploy cache.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read};
use std::path::Path;

/// Read buffer size for streaming file hashes
const CHUNK_SIZE: usize = 64 * 1024;

/// Content hash value object
///
/// Wraps a lowercase hex SHA-256 string (64 chars). Values loaded from a
/// cache file are kept as-is; a malformed value simply never matches a
/// freshly computed hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Length of the hex digest
    pub const HEX_LEN: usize = 64;

    /// Wrap an existing hex digest
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Compute the hash of an in-memory byte slice
    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(content)))
    }

    /// Compute the hash of everything a reader yields
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    /// Compute the hash of a file on disk
    pub fn of_file(path: &Path) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Get the hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this looks like a well-formed SHA-256 hex digest
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == Self::HEX_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContentHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
