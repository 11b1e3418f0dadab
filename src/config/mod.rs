//! Configuration module for upsync
//!
//! Configuration hierarchy, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (UPSYNC_*)
//! 3. Project config (upsync.toml, or the file given by --config)
//! 4. User config (~/.config/upsync/config.toml)
//! 5. Built-in defaults

mod env_validator;
mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{
    default_user_config_path, expand_tilde, load_layer_file, parse_layer, ConfigLoader,
    ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE,
};
pub use types::{
    ConfigLayer, DeployConfig, DeployLayer, ModeLayer, ServerConfig, ServerLayer, SshTarget,
    Transport, TransportConfig, DEFAULT_CACHE_FILE, DEFAULT_PORT, DEFAULT_SOURCE,
};
