//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod exclusion;
mod extra_source;
mod hash;
mod remote_path;

pub use exclusion::{ExclusionRule, ExclusionSet};
pub use extra_source::ExtraSource;
pub use hash::ContentHash;
pub use remote_path::RemotePath;
