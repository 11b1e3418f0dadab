//! Domain Services
//!
//! Local-side logic: enumerating the source tree and detecting changes.

mod change_detector;
mod collector;

pub use change_detector::{ChangeDetector, ChangeSet};
pub use collector::FileCollector;
