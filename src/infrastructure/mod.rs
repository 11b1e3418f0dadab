//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `cache/` - deploy cache persistence (JSON)
//! - `remote/` - remote sessions (ssh, local directory)
//! - `events/` - progress and NDJSON event output
//! - `confirm` - terminal overwrite prompt

pub mod cache;
pub mod confirm;
pub mod events;
pub mod remote;

pub use cache::JsonCacheStore;
pub use confirm::TerminalConfirmer;
pub use events::{JsonEventSink, LogEventSink};
pub use remote::{connector_for, LocalConnector, LocalSession, SshConnector, SshSession};
