//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problem, reported before any network activity
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting '{field}' (config file, UPSYNC_* variable or flag)")]
    MissingField { field: &'static str },

    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    #[error("failed to parse {file}: {message}")]
    Parse { file: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
