//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON object for one event
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Planned {
            total,
            to_upload,
            unchanged,
        } => serde_json::json!({
            "event": "planned",
            "total": total,
            "to_upload": to_upload,
            "unchanged": unchanged,
        }),

        DeployEvent::Connected { destination } => serde_json::json!({
            "event": "connected",
            "destination": destination,
        }),

        DeployEvent::Cleaned {
            removed_files,
            removed_dirs,
        } => serde_json::json!({
            "event": "cleaned",
            "removed_files": removed_files,
            "removed_dirs": removed_dirs,
        }),

        DeployEvent::ExistingFound { count } => serde_json::json!({
            "event": "existing_found",
            "count": count,
        }),

        DeployEvent::Cancelled => serde_json::json!({
            "event": "cancelled",
        }),

        DeployEvent::FileStarted { index, total, path } => serde_json::json!({
            "event": "item_start",
            "index": index,
            "total": total,
            "path": path,
        }),

        DeployEvent::FileUploaded { index, path } => serde_json::json!({
            "event": "item_uploaded",
            "index": index,
            "path": path,
        }),

        DeployEvent::FileFailed { index, path, error } => serde_json::json!({
            "event": "item_error",
            "index": index,
            "path": path,
            "error": error,
        }),

        DeployEvent::Completed {
            uploaded,
            failed,
            unchanged,
        } => {
            let status = if *failed == 0 { "success" } else { "partial" };
            serde_json::json!({
                "event": "complete",
                "status": status,
                "uploaded": uploaded,
                "failed": failed,
                "unchanged": unchanged,
            })
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }
}
