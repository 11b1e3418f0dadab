//! Remote Session Port
//!
//! The capability the deploy engine needs from a destination. Every call is
//! blocking and independently fallible; the engine issues them one at a time.

use std::path::Path;

use thiserror::Error;

use crate::domain::value_objects::RemotePath;

/// Result type for remote session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Remote operation errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// The remote path does not exist
    #[error("remote path not found: {0}")]
    NotFound(String),

    /// Connection-level failure; the session is no longer usable
    #[error("connection error: {0}")]
    Connection(String),

    /// The remote side rejected the operation
    #[error("remote command failed: {0}")]
    CommandFailed(String),

    /// Local I/O while talking to the destination
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// An entry reported by `RemoteSession::list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub is_dir: bool,
}

impl RemoteEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Operations against the deploy destination
///
/// Implementations:
/// - `SshSession` - system `ssh` over a multiplexed connection
/// - `LocalSession` - a directory on the local machine
pub trait RemoteSession {
    /// Whether a file or directory exists at `path`
    fn exists(&self, path: &RemotePath) -> SessionResult<bool>;

    /// Create `path` and any missing ancestors; a no-op if it exists
    fn ensure_dir(&self, path: &RemotePath) -> SessionResult<()>;

    /// List the direct children of `path`.
    ///
    /// Must fail with `SessionError::NotFound` when `path` does not exist.
    fn list(&self, path: &RemotePath) -> SessionResult<Vec<RemoteEntry>>;

    /// Delete a single file
    fn remove(&self, path: &RemotePath) -> SessionResult<()>;

    /// Delete an empty directory
    fn remove_dir(&self, path: &RemotePath) -> SessionResult<()>;

    /// Copy a local file to `remote`, overwriting whatever is there
    fn transfer(&self, local: &Path, remote: &RemotePath) -> SessionResult<()>;

    /// End the session. Called once, after the last operation.
    fn close(&mut self) -> SessionResult<()> {
        Ok(())
    }
}

/// Opens a `RemoteSession`
pub trait SessionConnector {
    /// Destination description, available before connecting
    fn destination(&self) -> String;

    /// Establish the session; failures here are always fatal
    fn connect(&self) -> SessionResult<Box<dyn RemoteSession>>;
}

impl<T: SessionConnector + ?Sized> SessionConnector for Box<T> {
    fn destination(&self) -> String {
        (**self).destination()
    }

    fn connect(&self) -> SessionResult<Box<dyn RemoteSession>> {
        (**self).connect()
    }
}
