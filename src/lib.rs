//! upsync - incremental, overwrite-safe deploys of build output
//!
//! upsync uploads a local build directory to a remote server, skipping
//! files whose content hash matches the last successful deploy and asking
//! before it overwrites anything that already exists remotely.
//!
//! The crate is layered:
//! - `domain` - entities, value objects, services and ports
//! - `application` - the deploy use case (plan, clean, confirm, upload)
//! - `infrastructure` - ssh and local sessions, JSON cache, prompts, event sinks
//! - `config` - layered TOML / environment / CLI configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{DeployOptions, DeployOutcome, DeployPlan, DeployReport, DeployUseCase};
pub use config::{ConfigLayer, ConfigLoader, DeployConfig};
pub use domain::entities::{DeployCache, FileEntry};
pub use domain::services::{ChangeDetector, FileCollector};
pub use domain::value_objects::{ContentHash, ExclusionRule, ExclusionSet, ExtraSource, RemotePath};
pub use error::{UpsyncError, UpsyncResult};
