//! Configuration loading
//!
//! Reads the user and project TOML files, overlays `UPSYNC_*` environment
//! variables and the command-line layer, then resolves the result.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::env_validator::{self, EnvVarValidator, BOOL_VALUES};
use super::types::{ConfigLayer, DeployConfig, Transport};
use super::ConfigError;

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = "upsync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Resolved configuration plus what went into it
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DeployConfig,
    pub warnings: Vec<ConfigWarning>,
    /// Config files that were read, lowest precedence first
    pub files: Vec<PathBuf>,
}

enum EnvSource {
    Process,
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(key).ok(),
            Self::Fixed(vars) => vars.get(key).cloned(),
        }
    }
}

/// Layered configuration loader
///
/// Precedence, lowest first: defaults, user config, project config
/// (or `--config`), environment, command line.
pub struct ConfigLoader {
    project_dir: PathBuf,
    config_file: Option<PathBuf>,
    user_config: Option<PathBuf>,
    env: EnvSource,
}

impl ConfigLoader {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            config_file: None,
            user_config: default_user_config_path(),
            env: EnvSource::Process,
        }
    }

    /// Use this file instead of `<project>/upsync.toml`; it must exist
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override (or disable with `None`) the user config location
    pub fn with_user_config(mut self, path: Option<PathBuf>) -> Self {
        self.user_config = path;
        self
    }

    /// Read environment overrides from a fixed map instead of the process
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env = EnvSource::Fixed(vars);
        self
    }

    /// Load every layer, overlay `cli` on top and resolve
    pub fn load(&self, cli: ConfigLayer) -> Result<LoadedConfig, ConfigError> {
        self.load_with_writer(cli, &mut io::stderr())
    }

    /// Like [`load`](Self::load), with env warnings written to `writer`
    pub fn load_with_writer<W: io::Write>(
        &self,
        cli: ConfigLayer,
        writer: &mut W,
    ) -> Result<LoadedConfig, ConfigError> {
        let mut merged = ConfigLayer::default();
        let mut warnings = Vec::new();
        let mut files = Vec::new();

        if let Some(user) = self.user_config.as_deref().filter(|p| p.is_file()) {
            let (layer, layer_warnings) = load_layer_file(user)?;
            merged = merged.merge(layer);
            warnings.extend(layer_warnings);
            files.push(user.to_path_buf());
        }

        let project = match &self.config_file {
            Some(explicit) => Some(explicit.clone()),
            None => Some(self.project_dir.join(PROJECT_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        if let Some(project) = project {
            let (layer, layer_warnings) = load_layer_file(&project)?;
            merged = merged.merge(layer);
            warnings.extend(layer_warnings);
            files.push(project);
        }

        merged = merged.merge(env_layer(&self.env, writer));
        merged = merged.merge(cli);

        debug!(files = ?files, "configuration layers loaded");
        let config = merged.resolve()?;
        Ok(LoadedConfig {
            config,
            warnings,
            files,
        })
    }
}

/// Parse one TOML layer, collecting unknown keys as warnings.
///
/// Relative local paths are resolved against the file's directory.
pub fn load_layer_file(path: &Path) -> Result<(ConfigLayer, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (layer, warnings) = parse_layer(&content, path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok((rebase_layer(layer, base), warnings))
}

/// Parse TOML content; `file` is only used for messages
pub fn parse_layer(
    content: &str,
    file: &Path,
) -> Result<(ConfigLayer, Vec<ConfigWarning>), ConfigError> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let layer: ConfigLayer = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        file: file.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                file: file.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((layer, warnings))
}

fn rebase_layer(mut layer: ConfigLayer, base: &Path) -> ConfigLayer {
    let rebase = |p: PathBuf| {
        let p = expand_tilde(&p);
        if p.is_absolute() {
            p
        } else {
            base.join(p)
        }
    };
    layer.deploy.source = layer.deploy.source.map(rebase);
    layer.deploy.cache_file = layer.deploy.cache_file.map(rebase);
    layer.server.secret = layer.server.secret.map(rebase);
    layer.deploy.extra_sources = layer.deploy.extra_sources.map(|sources| {
        sources
            .into_iter()
            .map(|s| s.resolved_against(base))
            .collect()
    });
    layer
}

/// Read `UPSYNC_*` overrides; invalid values warn and are dropped
fn env_layer<W: io::Write>(env: &EnvSource, writer: &mut W) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    let text = |key: &str| env.get(key).filter(|v| !v.trim().is_empty());
    let flag = |key: &str, writer: &mut W| {
        text(key).and_then(|value| {
            EnvVarValidator::new(key, BOOL_VALUES).parse(&value, env_validator::parse_bool, writer)
        })
    };

    if let Some(value) = text("UPSYNC_TRANSPORT") {
        layer.server.transport = EnvVarValidator::new("UPSYNC_TRANSPORT", Transport::VALID_VALUES)
            .parse(&value, Transport::parse, writer);
    }
    layer.server.host = text("UPSYNC_HOST");
    if let Some(value) = text("UPSYNC_PORT") {
        layer.server.port =
            EnvVarValidator::new("UPSYNC_PORT", &[]).parse(&value, env_validator::parse_port, writer);
    }
    layer.server.username = text("UPSYNC_USERNAME");
    layer.server.secret = text("UPSYNC_SECRET").map(|v| expand_tilde(Path::new(&v)));
    layer.server.remote_root = text("UPSYNC_REMOTE_ROOT");
    layer.deploy.source = text("UPSYNC_SOURCE").map(|v| expand_tilde(Path::new(&v)));
    layer.deploy.cache_file = text("UPSYNC_CACHE_FILE").map(|v| expand_tilde(Path::new(&v)));
    layer.mode.unattended = flag("UPSYNC_UNATTENDED", writer);
    layer.mode.incremental = flag("UPSYNC_INCREMENTAL", writer);
    layer.mode.clean = flag("UPSYNC_CLEAN", writer);
    layer
}

/// `~/...` → home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// `$XDG_CONFIG_HOME/upsync/config.toml`, falling back to `~/.config`
pub fn default_user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|dir| dir.join("upsync/config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "server",
        "transport",
        "host",
        "port",
        "username",
        "secret",
        "remote_root",
        "deploy",
        "source",
        "exclude",
        "extra_sources",
        "cache_file",
        "follow_symlinks",
        "mode",
        "unattended",
        "incremental",
        "clean",
    ];

    env_validator::closest(unknown, CANDIDATES).map(|(candidate, _)| candidate.to_string())
}
