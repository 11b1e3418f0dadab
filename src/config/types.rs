//! Configuration type definitions
//!
//! `ConfigLayer` is what a single source (file, environment, command line)
//! contributes: every field optional. Layers are merged and then resolved
//! into a validated `DeployConfig`.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ExclusionRule, ExclusionSet, ExtraSource, RemotePath};

use super::ConfigError;

pub const DEFAULT_PORT: u16 = 22;
pub const DEFAULT_SOURCE: &str = "dist";
pub const DEFAULT_CACHE_FILE: &str = ".upsync-cache.json";

/// How the destination is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// System `ssh` client
    #[default]
    Ssh,
    /// A directory on this machine (mounted share, staging dir)
    Local,
}

impl Transport {
    pub const VALID_VALUES: &'static [&'static str] = &["ssh", "local"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ssh" => Some(Self::Ssh),
            "local" | "file" => Some(Self::Local),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssh => "ssh",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[server]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerLayer {
    pub transport: Option<Transport>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    /// Path to an SSH identity file
    pub secret: Option<PathBuf>,
    pub remote_root: Option<String>,
}

/// `[deploy]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeployLayer {
    pub source: Option<PathBuf>,
    pub exclude: Option<Vec<ExclusionRule>>,
    pub extra_sources: Option<Vec<ExtraSource>>,
    pub cache_file: Option<PathBuf>,
    pub follow_symlinks: Option<bool>,
}

/// `[mode]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModeLayer {
    pub unattended: Option<bool>,
    pub incremental: Option<bool>,
    pub clean: Option<bool>,
}

/// One configuration source, all fields optional
///
/// ```toml
/// [server]
/// host = "example.com"
/// username = "deploy"
/// remote_root = "/var/www/site"
///
/// [deploy]
/// source = "dist"
/// exclude = ["*.map", ".DS_Store", { contains = "/drafts/" }]
/// extra_sources = ["public", { from = "docs/build", to = "docs" }]
///
/// [mode]
/// incremental = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub server: ServerLayer,
    pub deploy: DeployLayer,
    pub mode: ModeLayer,
}

impl ConfigLayer {
    /// Overlay `higher` on top of `self`; set fields in `higher` win.
    ///
    /// Lists are replaced, not concatenated.
    pub fn merge(self, higher: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            server: ServerLayer {
                transport: higher.server.transport.or(self.server.transport),
                host: higher.server.host.or(self.server.host),
                port: higher.server.port.or(self.server.port),
                username: higher.server.username.or(self.server.username),
                secret: higher.server.secret.or(self.server.secret),
                remote_root: higher.server.remote_root.or(self.server.remote_root),
            },
            deploy: DeployLayer {
                source: higher.deploy.source.or(self.deploy.source),
                exclude: higher.deploy.exclude.or(self.deploy.exclude),
                extra_sources: higher.deploy.extra_sources.or(self.deploy.extra_sources),
                cache_file: higher.deploy.cache_file.or(self.deploy.cache_file),
                follow_symlinks: higher.deploy.follow_symlinks.or(self.deploy.follow_symlinks),
            },
            mode: ModeLayer {
                unattended: higher.mode.unattended.or(self.mode.unattended),
                incremental: higher.mode.incremental.or(self.mode.incremental),
                clean: higher.mode.clean.or(self.mode.clean),
            },
        }
    }

    /// Fill in defaults and validate
    pub fn resolve(self) -> Result<DeployConfig, ConfigError> {
        let transport = self.server.transport.unwrap_or_default();

        let raw_root = non_blank(self.server.remote_root)
            .ok_or(ConfigError::MissingField { field: "remote_root" })?;
        if !raw_root.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "remote_root",
                message: format!("'{}' must be an absolute path", raw_root),
            });
        }
        if has_parent_segment(&raw_root) {
            return Err(ConfigError::InvalidValue {
                field: "remote_root",
                message: format!("'{}' must not contain '..'", raw_root),
            });
        }
        let remote_root = RemotePath::new(&raw_root);
        let clean = self.mode.clean.unwrap_or(false);
        if clean && remote_root.is_root() {
            return Err(ConfigError::InvalidValue {
                field: "remote_root",
                message: "clean mode cannot wipe the filesystem root '/'".to_string(),
            });
        }

        let extra_sources = self.deploy.extra_sources.unwrap_or_default();
        if let Some(bad) = extra_sources
            .iter()
            .find(|extra| has_parent_segment(&extra.remote_prefix()))
        {
            return Err(ConfigError::InvalidValue {
                field: "extra_sources",
                message: format!(
                    "remote prefix '{}' for {} would leave the remote root",
                    bad.remote_prefix(),
                    bad.local_root().display()
                ),
            });
        }

        let transport = match transport {
            Transport::Local => TransportConfig::Local,
            Transport::Ssh => {
                let host =
                    non_blank(self.server.host).ok_or(ConfigError::MissingField { field: "host" })?;
                let username = non_blank(self.server.username)
                    .ok_or(ConfigError::MissingField { field: "username" })?;
                let port = self.server.port.unwrap_or(DEFAULT_PORT);
                if port == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "port",
                        message: "port must be between 1 and 65535".to_string(),
                    });
                }
                TransportConfig::Ssh(SshTarget {
                    host,
                    port,
                    username,
                    identity: self.server.secret,
                })
            }
        };

        Ok(DeployConfig {
            server: ServerConfig {
                transport,
                remote_root,
            },
            source: self
                .deploy
                .source
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE)),
            exclusions: ExclusionSet::new(self.deploy.exclude.unwrap_or_default()),
            extra_sources,
            cache_file: self
                .deploy
                .cache_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE)),
            follow_symlinks: self.deploy.follow_symlinks.unwrap_or(false),
            unattended: self.mode.unattended.unwrap_or(false),
            incremental: self.mode.incremental.unwrap_or(true),
            clean,
        })
    }
}

fn has_parent_segment(path: &str) -> bool {
    path.split('/').any(|seg| seg == "..")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// SSH connection parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub identity: Option<PathBuf>,
}

impl SshTarget {
    /// `user@host` as passed to ssh
    pub fn destination(&self) -> String {
        format!("{}@{}", self.username, self.host)
    }
}

/// Resolved transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Ssh(SshTarget),
    Local,
}

impl TransportConfig {
    pub fn kind(&self) -> Transport {
        match self {
            Self::Ssh(_) => Transport::Ssh,
            Self::Local => Transport::Local,
        }
    }
}

/// Resolved connection target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub transport: TransportConfig,
    pub remote_root: RemotePath,
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub server: ServerConfig,
    pub source: PathBuf,
    pub exclusions: ExclusionSet,
    pub extra_sources: Vec<ExtraSource>,
    pub cache_file: PathBuf,
    pub follow_symlinks: bool,
    pub unattended: bool,
    pub incremental: bool,
    pub clean: bool,
}
