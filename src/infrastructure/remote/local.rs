//! Local Directory Session
//!
//! Treats remote paths as paths on this machine, for deploying to a mounted
//! share or a staging directory. Transfers go through a temp file in the
//! target directory and a rename, so readers never see partial content.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::ports::{
    RemoteEntry, RemoteSession, SessionConnector, SessionError, SessionResult,
};
use crate::domain::value_objects::RemotePath;

/// Opens `LocalSession`s
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalConnector;

impl LocalConnector {
    pub fn new() -> Self {
        Self
    }
}

impl SessionConnector for LocalConnector {
    fn destination(&self) -> String {
        "local filesystem".to_string()
    }

    fn connect(&self) -> SessionResult<Box<dyn RemoteSession>> {
        Ok(Box::new(LocalSession::new()))
    }
}

/// Session backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSession;

impl LocalSession {
    pub fn new() -> Self {
        Self
    }

    fn path(remote: &RemotePath) -> PathBuf {
        PathBuf::from(remote.as_str())
    }
}

fn map_io(path: &RemotePath, err: io::Error) -> SessionError {
    if err.kind() == io::ErrorKind::NotFound {
        SessionError::NotFound(path.to_string())
    } else {
        SessionError::CommandFailed(format!("{}: {}", path, err))
    }
}

impl RemoteSession for LocalSession {
    fn exists(&self, path: &RemotePath) -> SessionResult<bool> {
        let target = Self::path(path);
        Ok(target.exists() || target.is_symlink())
    }

    fn ensure_dir(&self, path: &RemotePath) -> SessionResult<()> {
        fs::create_dir_all(Self::path(path)).map_err(|e| map_io(path, e))
    }

    fn list(&self, path: &RemotePath) -> SessionResult<Vec<RemoteEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(Self::path(path)).map_err(|e| map_io(path, e))? {
            let entry = entry.map_err(|e| map_io(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|e| map_io(path, e))?;
            entries.push(if file_type.is_dir() {
                RemoteEntry::dir(name)
            } else {
                RemoteEntry::file(name)
            });
        }
        Ok(entries)
    }

    fn remove(&self, path: &RemotePath) -> SessionResult<()> {
        fs::remove_file(Self::path(path)).map_err(|e| map_io(path, e))
    }

    fn remove_dir(&self, path: &RemotePath) -> SessionResult<()> {
        fs::remove_dir(Self::path(path)).map_err(|e| map_io(path, e))
    }

    fn transfer(&self, local: &Path, remote: &RemotePath) -> SessionResult<()> {
        let target = Self::path(remote);
        let dir = target
            .parent()
            .ok_or_else(|| SessionError::CommandFailed(format!("{}: no parent directory", remote)))?;

        let mut source = File::open(local)?;
        let permissions = source.metadata()?.permissions();

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| map_io(remote, e))?;
        io::copy(&mut source, tmp.as_file_mut())?;
        fs::set_permissions(tmp.path(), permissions)?;
        tmp.persist(&target)
            .map_err(|e| map_io(remote, io::Error::from(e)))?;

        debug!(from = %local.display(), to = %target.display(), "copied");
        Ok(())
    }
}
