use std::path::PathBuf;

use clap::{Args, Parser};
use upsync::config::{ConfigLayer, Transport};
use upsync::ExclusionRule;

/// upsync - deploy build output to a remote server
#[derive(Parser, Debug)]
#[command(name = "upsync")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Settings are read from upsync.toml, ~/.config/upsync/config.toml \
and UPSYNC_* environment variables; flags win over all of them.")]
pub struct Cli {
    /// Project config file (default: ./upsync.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events on stdout
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub deploy: DeployArgs,
}

/// Per-run settings; each one overrides the configuration files
#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// Local directory to upload
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Destination directory on the server (absolute)
    #[arg(short = 'r', long, value_name = "PATH")]
    pub remote_root: Option<String>,

    /// Transport: ssh or local
    #[arg(long, value_parser = parse_transport)]
    pub transport: Option<Transport>,

    /// Server host name
    #[arg(long)]
    pub host: Option<String>,

    /// SSH port
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// SSH user name
    #[arg(short, long)]
    pub username: Option<String>,

    /// SSH identity file
    #[arg(short, long, value_name = "FILE")]
    pub identity: Option<PathBuf>,

    /// Exclusion pattern (repeatable; replaces the configured list)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN", value_parser = parse_exclusion)]
    pub exclude: Vec<ExclusionRule>,

    /// Deploy cache location
    #[arg(long, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// Overwrite existing remote files without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Only upload files that changed since the last deploy
    #[arg(long, conflicts_with = "full")]
    pub incremental: bool,

    /// Upload every file and skip the deploy cache
    #[arg(long)]
    pub full: bool,

    /// Delete everything under the remote root before uploading
    #[arg(long)]
    pub clean: bool,

    /// Follow symbolic links while collecting files
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Show what would be uploaded without connecting
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 2 if any file failed to upload
    #[arg(long)]
    pub strict: bool,
}

impl DeployArgs {
    /// The command-line configuration layer; unset flags leave lower layers alone
    pub fn to_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();
        layer.server.transport = self.transport;
        layer.server.host = self.host.clone();
        layer.server.port = self.port;
        layer.server.username = self.username.clone();
        layer.server.secret = self.identity.clone();
        layer.server.remote_root = self.remote_root.clone();
        layer.deploy.source = self.source.clone();
        layer.deploy.cache_file = self.cache_file.clone();
        if !self.exclude.is_empty() {
            layer.deploy.exclude = Some(self.exclude.clone());
        }
        layer.deploy.follow_symlinks = self.follow_symlinks.then_some(true);
        layer.mode.unattended = self.yes.then_some(true);
        layer.mode.clean = self.clean.then_some(true);
        layer.mode.incremental = if self.full {
            Some(false)
        } else {
            self.incremental.then_some(true)
        };
        layer
    }
}

fn parse_transport(value: &str) -> Result<Transport, String> {
    Transport::parse(value).ok_or_else(|| {
        format!(
            "unknown transport '{}' (expected one of: {})",
            value,
            Transport::VALID_VALUES.join(", ")
        )
    })
}

fn parse_exclusion(value: &str) -> Result<ExclusionRule, String> {
    ExclusionRule::parse(value).ok_or_else(|| "exclusion pattern must not be empty".to_string())
}
