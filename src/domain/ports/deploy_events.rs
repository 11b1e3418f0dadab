//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Local planning finished
    Planned {
        total: usize,
        to_upload: usize,
        unchanged: usize,
    },

    /// Session established
    Connected { destination: String },

    /// Destination wiped (clean mode)
    Cleaned {
        removed_files: usize,
        removed_dirs: usize,
    },

    /// Files already present at the destination
    ExistingFound { count: usize },

    /// Operator declined the overwrite prompt
    Cancelled,

    /// Transfer of one file is starting
    FileStarted {
        index: usize,
        total: usize,
        path: String,
    },

    /// File transferred
    FileUploaded { index: usize, path: String },

    /// File transfer failed; the run continues
    FileFailed {
        index: usize,
        path: String,
        error: String,
    },

    /// Upload loop finished
    Completed {
        uploaded: usize,
        failed: usize,
        unchanged: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - `LogEventSink`: progress lines on stdout
/// - `JsonEventSink`: NDJSON event stream for CI
pub trait DeployEventSink {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}
