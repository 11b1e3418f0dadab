//! Human-readable progress output
//!
//! `[i/n] path` per file plus one line per phase, on stdout.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that prints progress lines
pub struct LogEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl LogEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

/// Progress line for an event, if it deserves one
pub fn render_event(event: &DeployEvent) -> Option<String> {
    let line = match event {
        DeployEvent::Planned {
            total,
            to_upload,
            unchanged,
        } => {
            if *unchanged > 0 {
                format!(
                    "{} of {} files to upload ({} unchanged)",
                    to_upload, total, unchanged
                )
            } else {
                format!("{} files to upload", to_upload)
            }
        }
        DeployEvent::Connected { destination } => format!("Connected to {}", destination),
        DeployEvent::Cleaned {
            removed_files,
            removed_dirs,
        } => format!(
            "Cleaned destination: removed {} files and {} directories",
            removed_files, removed_dirs
        ),
        DeployEvent::ExistingFound { count } => {
            format!("{} files already exist on the destination", count)
        }
        DeployEvent::Cancelled => "Deploy cancelled, nothing was uploaded".to_string(),
        DeployEvent::FileStarted { index, total, path } => {
            format!("[{}/{}] {}", index + 1, total, path)
        }
        DeployEvent::FileUploaded { .. } => return None,
        DeployEvent::FileFailed { path, error, .. } => format!("  failed {}: {}", path, error),
        DeployEvent::Completed {
            uploaded,
            failed,
            unchanged,
        } => format!(
            "Done: {} uploaded, {} failed, {} unchanged",
            uploaded, failed, unchanged
        ),
    };
    Some(line)
}

impl DeployEventSink for LogEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Some(line) = render_event(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
