//! CLI module for the uptime dashboard
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `watch` - Live terminal dashboard
//! - `health` - Probe the API health endpoint once
//! - `monitors` - List, show, add, edit and remove monitors
//! - `snapshot` - Render the dashboard page as HTML
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Live dashboard against a remote API
//! uptime watch --api-url http://monitor.internal:8000
//!
//! # Add a monitor
//! uptime monitors add --name "Site A" --url https://a.example --interval 30
//!
//! # Generate shell completions
//! uptime completions bash > ~/.bash_completion.d/uptime
//! ```

pub mod completions;
pub mod config;
pub mod health;
pub mod monitors;
pub mod output;
pub mod snapshot;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::client::HttpMonitorApi;
use crate::config::{ConfigError, UptimeConfig};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Uptime - dashboard client for uptime-monitor APIs
#[derive(Parser, Debug)]
#[command(
    name = "uptime",
    version,
    about = "Dashboard client for uptime-monitor REST APIs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Live terminal dashboard
    Watch(WatchArgs),
    /// Check API health
    Health(HealthArgs),
    /// Manage monitors
    #[command(subcommand)]
    Monitors(MonitorsCommands),
    /// Render the dashboard page as HTML
    Snapshot(SnapshotArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "uptime.toml";

/// Options shared by every command that talks to the API
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the API base URL
    #[arg(short = 'a', long, env = "UPTIME_API_URL")]
    pub api_url: Option<String>,
}

impl ConnectionArgs {
    /// Load configuration with CLI overrides
    ///
    /// A missing file at the default path falls back to defaults; any other
    /// missing path is an error.
    pub fn load_config(&self) -> Result<UptimeConfig, ConfigError> {
        let mut config = if self.config.exists() || self.config != Path::new(DEFAULT_CONFIG_PATH) {
            UptimeConfig::load(Some(&self.config))?
        } else {
            tracing::debug!(path = %self.config.display(), "Config file not found, using defaults");
            UptimeConfig::default()
        };

        config = config.with_env_overrides();

        if let Some(ref url) = self.api_url {
            config.api.base_url = url.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration and build an API client from it
    pub fn connect(&self) -> Result<(UptimeConfig, Arc<HttpMonitorApi>), Box<dyn std::error::Error>> {
        let config = self.load_config()?;
        let api = HttpMonitorApi::new(&config.api)?;
        tracing::debug!(base_url = %api.base_url(), "Connecting to monitor API");
        Ok((config, Arc::new(api)))
    }
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Override the refresh interval in milliseconds
    #[arg(short, long, env = "UPTIME_POLL_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "UPTIME_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Print frames one after another instead of clearing the screen
    #[arg(long)]
    pub no_clear: bool,
}

#[derive(Args, Debug)]
pub struct HealthArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum MonitorsCommands {
    /// List monitors
    List(MonitorsListArgs),
    /// Show one monitor
    Show(MonitorsShowArgs),
    /// Create a monitor
    Add(MonitorsAddArgs),
    /// Edit a monitor (prompts for values not given)
    Edit(MonitorsEditArgs),
    /// Delete a monitor
    Remove(MonitorsRemoveArgs),
}

#[derive(Args, Debug)]
pub struct MonitorsListArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MonitorsShowArgs {
    /// Monitor ID
    pub id: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MonitorsAddArgs {
    /// Monitor name
    #[arg(short, long)]
    pub name: String,

    /// URL to check
    #[arg(short, long)]
    pub url: String,

    /// Check interval in seconds
    #[arg(short, long, default_value = "60")]
    pub interval: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct MonitorsEditArgs {
    /// Monitor ID
    pub id: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// New interval in seconds
    #[arg(short, long)]
    pub interval: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct MonitorsRemoveArgs {
    /// Monitor ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Write the page to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page title
    #[arg(long, default_value = "Uptime Monitor")]
    pub title: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
