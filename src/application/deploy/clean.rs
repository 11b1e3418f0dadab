//! Destination wipe for clean mode
//!
//! Depth-first `list` / `remove` / `remove_dir` below the deploy root.
//! The root directory itself is kept.

use tracing::{debug, info};

use crate::domain::ports::{RemoteSession, SessionError};
use crate::domain::value_objects::RemotePath;

use super::result::CleanStats;

/// Delete everything below `root`.
///
/// A missing root (or a child that vanished mid-walk) counts as already clean
/// and is not counted as removed. Any other failure stops the wipe and is
/// returned to the caller.
pub fn clean_destination(
    session: &dyn RemoteSession,
    root: &RemotePath,
) -> Result<CleanStats, (RemotePath, SessionError)> {
    let mut stats = CleanStats::default();
    clean_children(session, root, &mut stats)?;
    info!(
        root = %root,
        files = stats.removed_files,
        dirs = stats.removed_dirs,
        "destination cleaned"
    );
    Ok(stats)
}

fn clean_children(
    session: &dyn RemoteSession,
    dir: &RemotePath,
    stats: &mut CleanStats,
) -> Result<(), (RemotePath, SessionError)> {
    let entries = match session.list(dir) {
        Ok(entries) => entries,
        Err(err) if err.is_not_found() => {
            debug!(path = %dir, "nothing to clean");
            return Ok(());
        }
        Err(err) => return Err((dir.clone(), err)),
    };

    for entry in entries {
        let path = dir.child(&entry.name);
        if entry.is_dir {
            clean_children(session, &path, stats)?;
            if removed(session.remove_dir(&path)).map_err(|e| (path.clone(), e))? {
                stats.removed_dirs += 1;
            }
        } else if removed(session.remove(&path)).map_err(|e| (path.clone(), e))? {
            stats.removed_files += 1;
        }
    }
    Ok(())
}

/// `Ok(false)` when the entry was already gone
fn removed(result: Result<(), SessionError>) -> Result<bool, SessionError> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_not_found() => {
            debug!(error = %err, "already gone");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
