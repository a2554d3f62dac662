//! Configuration module for the uptime dashboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`UPTIME_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use uptime::config::UptimeConfig;
//!
//! // Load defaults
//! let config = UptimeConfig::default();
//! assert_eq!(config.polling.interval_ms, 15000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [api]
//! base_url = "http://monitor.internal:8000"
//! "#;
//! let config: UptimeConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.api.base_url, "http://monitor.internal:8000");
//! ```

pub mod api;
pub mod error;
pub mod logging;
pub mod polling;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use polling::{EditConfig, PollingConfig, DEFAULT_POLL_INTERVAL_MS};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UptimeConfig {
    /// Monitor API connection
    pub api: ApiConfig,
    /// Refresh cadence
    pub polling: PollingConfig,
    /// Edit prompt behaviour
    pub edit: EditConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl UptimeConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports UPTIME_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("UPTIME_API_URL") {
            if !url.is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(timeout) = std::env::var("UPTIME_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.api.timeout_seconds = t;
            }
        }
        if let Ok(interval) = std::env::var("UPTIME_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.polling.interval_ms = ms;
            }
        }

        if let Ok(level) = std::env::var("UPTIME_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("UPTIME_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Validation {
                    field: "api.base_url".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Validation {
                    field: "api.base_url".to_string(),
                    message: e.to_string(),
                });
            }
        }

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        if self.polling.interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "polling.interval_ms".to_string(),
                message: "interval must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
