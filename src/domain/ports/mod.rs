//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod cache_store;
pub mod confirm;
pub mod deploy_events;
pub mod remote_session;

pub use cache_store::{CacheError, CacheStore};
pub use confirm::{ConfirmError, OverwriteConfirmer, OverwritePrompt};
pub use deploy_events::{DeployEvent, DeployEventSink};
pub use remote_session::{
    RemoteEntry, RemoteSession, SessionConnector, SessionError, SessionResult,
};
