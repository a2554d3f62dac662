//! Refresh cadence and edit-flow configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default refresh cadence of the dashboard.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 15_000;

/// Periodic refresh configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Milliseconds between refresh cycles
    pub interval_ms: u64,
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Edit prompt behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Abandon edits with an empty field without showing a notice
    pub silent_abandon: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_defaults() {
        let config = PollingConfig::default();
        assert_eq!(config.interval_ms, 15_000);
        assert_eq!(config.interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_edit_defaults_to_visible_abandon() {
        assert!(!EditConfig::default().silent_abandon);
    }
}
