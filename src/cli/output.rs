//! Output formatting helpers for CLI commands

pub use crate::dashboard::text::{format_health_line, format_monitor_detail, format_monitors_table};

use crate::monitor::Monitor;
use serde_json::json;

/// Format monitors as JSON
pub fn format_monitors_json(monitors: &[Monitor]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "monitors": monitors
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorId;

    #[test]
    fn test_format_monitors_json_valid() {
        let monitor = Monitor {
            id: MonitorId::new("12"),
            name: "status-page".to_string(),
            url: "https://status.example".to_string(),
            interval_seconds: 45,
        };
        let output = format_monitors_json(&[monitor]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["monitors"][0]["id"], "12");
        assert_eq!(parsed["monitors"][0]["interval_seconds"], 45);
    }

    #[test]
    fn test_format_monitors_json_keeps_raw_text() {
        // JSON escaping already neutralises control characters
        let monitor = Monitor {
            id: MonitorId::new("1"),
            name: "evil\x1b[2J".to_string(),
            url: "https://x.example".to_string(),
            interval_seconds: 30,
        };
        let output = format_monitors_json(&[monitor]).unwrap();
        assert!(!output.contains('\x1b'));
        assert!(output.contains("\\u001b[2J"));
    }
}
