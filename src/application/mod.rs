//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - plan, connect, clean or discover, confirm, upload, update cache

pub mod deploy;

pub use deploy::{
    CacheUpdate, CleanStats, DeployOptions, DeployOutcome, DeployPlan, DeployReport,
    DeployUseCase, UploadResult, Uploader,
};
