//! Domain Entities
//!
//! - `FileEntry` - A local file paired with its remote-relative path
//! - `DeployCache` - Tracks hashes of what was last deployed

mod deploy_cache;
mod file_entry;

pub use deploy_cache::DeployCache;
pub use file_entry::FileEntry;
