//! Remote session implementations
//!
//! - `ssh` - system ssh client with connection multiplexing
//! - `local` - a directory on this machine

mod local;
mod ssh;

pub use local::{LocalConnector, LocalSession};
pub use ssh::{SshConnector, SshSession};

use crate::config::{ServerConfig, TransportConfig};
use crate::domain::ports::SessionConnector;

/// Pick the connector for a resolved server configuration
pub fn connector_for(server: &ServerConfig) -> Box<dyn SessionConnector> {
    match &server.transport {
        TransportConfig::Ssh(target) => Box::new(SshConnector::new(target.clone())),
        TransportConfig::Local => Box::new(LocalConnector::new()),
    }
}
