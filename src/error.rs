//! Error types for upsync
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{ConfirmError, SessionError};

/// Result type alias for upsync operations
pub type UpsyncResult<T> = Result<T, UpsyncError>;

/// Main error type for a deploy run
///
/// Only fatal conditions live here. Per-file transfer failures are counted
/// in `UploadResult` and never surface as an `UpsyncError`.
#[derive(Error, Debug)]
pub enum UpsyncError {
    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Local source root does not exist
    #[error("source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A local file could not be read while hashing
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Connecting to the destination failed
    #[error("connection to {destination} failed: {source}")]
    Connect {
        destination: String,
        #[source]
        source: SessionError,
    },

    /// A remote operation failed in a way that aborts the run
    #[error("remote operation on {path} failed: {source}")]
    Remote {
        path: String,
        #[source]
        source: SessionError,
    },

    /// The overwrite prompt could not be shown
    #[error(transparent)]
    Confirm(#[from] ConfirmError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UpsyncError {
    /// Whether the error came from the connection layer
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Connect { .. } => true,
            Self::Remote { source, .. } => source.is_connection(),
            _ => false,
        }
    }
}
