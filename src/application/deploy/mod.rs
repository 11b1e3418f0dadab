//! Deploy Module
//!
//! Orchestrates the deployment flow for upsync.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Plan and outcome types (`DeployPlan`, `DeployOutcome`, `UploadResult`)
//! - `clean` - Destination wipe for clean mode
//! - `uploader` - Sequential transfer loop (`Uploader`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use upsync::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(connector, cache_store);
//! let outcome = use_case.execute(&options, &confirmer, &events)?;
//! ```

mod clean;
mod options;
mod result;
mod uploader;
mod use_case;

pub use clean::clean_destination;
pub use options::DeployOptions;
pub use result::{
    CacheUpdate, CleanStats, DeployOutcome, DeployPlan, DeployReport, UploadResult,
};
pub use uploader::{UploadAborted, Uploader};
pub use use_case::DeployUseCase;
