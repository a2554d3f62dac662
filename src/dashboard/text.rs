//! Plain-text rendering shared by the terminal renderer and the CLI.
//!
//! Server-supplied strings are passed through [`sanitize_terminal`] before
//! they are written, so control sequences in a monitor name or an error
//! detail cannot drive the terminal.

use super::view::{HealthView, PENDING_STATUS};
use crate::monitor::Monitor;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Replace control characters with U+FFFD.
pub fn sanitize_terminal(input: &str) -> String {
    input
        .chars()
        .map(|ch| if ch.is_control() { '\u{FFFD}' } else { ch })
        .collect()
}

/// Format the health status line
pub fn format_health_line(health: HealthView) -> String {
    let label = match health {
        HealthView::Operational => format!("● {}", health.label()).green(),
        HealthView::Degraded => format!("● {}", health.label()).red(),
    };
    format!("Status: {}", label)
}

/// Format monitors as a table, in the given order
pub fn format_monitors_table(monitors: &[Monitor]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "URL", "Interval", "Status", "ID"]);

    for m in monitors {
        table.add_row(vec![
            Cell::new(sanitize_terminal(&m.name)),
            Cell::new(sanitize_terminal(&m.url)),
            Cell::new(format!("{}s", m.interval_seconds)),
            Cell::new(PENDING_STATUS.dimmed().to_string()),
            Cell::new(sanitize_terminal(m.id.as_str())),
        ]);
    }

    table.to_string()
}

/// Format a single monitor as key/value lines
pub fn format_monitor_detail(monitor: &Monitor) -> String {
    format!(
        "ID: {}\nName: {}\nURL: {}\nInterval: {}s\n",
        sanitize_terminal(monitor.id.as_str()),
        sanitize_terminal(&monitor.name),
        sanitize_terminal(&monitor.url),
        monitor.interval_seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorId;

    fn create_test_monitor() -> Monitor {
        Monitor {
            id: MonitorId::new("12"),
            name: "status-page".to_string(),
            url: "https://status.example".to_string(),
            interval_seconds: 45,
        }
    }

    fn hostile_monitor() -> Monitor {
        Monitor {
            id: MonitorId::new("7\x1b[2J"),
            name: "evil\x1b]0;pwned\x07\x1b[2J".to_string(),
            url: "https://x.example/\r\nforged".to_string(),
            interval_seconds: 30,
        }
    }

    #[test]
    fn test_sanitize_terminal_replaces_controls() {
        assert_eq!(sanitize_terminal("a\x1bb\x07c\u{9b}d"), "a\u{FFFD}b\u{FFFD}c\u{FFFD}d");
        assert_eq!(sanitize_terminal("plain ünïcode ✓"), "plain ünïcode ✓");
        assert_eq!(sanitize_terminal("line\nbreak\ttab"), "line\u{FFFD}break\u{FFFD}tab");
    }

    #[test]
    fn test_format_monitors_table_empty() {
        let output = format_monitors_table(&[]);
        assert!(output.contains("Name")); // Header present
    }

    #[test]
    fn test_format_monitors_table_with_data() {
        let output = format_monitors_table(&[create_test_monitor()]);
        assert!(output.contains("status-page"));
        assert!(output.contains("45s"));
        assert!(output.contains("Pending"));
    }

    #[test]
    fn test_format_monitors_table_strips_escape_sequences() {
        let output = format_monitors_table(&[hostile_monitor()]);
        assert!(!output.contains("\x1b]0;"));
        assert!(!output.contains("\x1b[2J"));
        assert!(!output.contains('\x07'));
        assert!(output.contains("evil"));
    }

    #[test]
    fn test_format_health_line() {
        assert!(format_health_line(HealthView::Operational).contains("Operational"));
        assert!(format_health_line(HealthView::Degraded).contains("Degraded"));
    }

    #[test]
    fn test_format_monitor_detail() {
        let output = format_monitor_detail(&create_test_monitor());
        assert!(output.contains("ID: 12"));
        assert!(output.contains("Interval: 45s"));
    }

    #[test]
    fn test_format_monitor_detail_strips_escape_sequences() {
        let output = format_monitor_detail(&hostile_monitor());
        assert!(!output.contains('\x1b'));
        assert!(!output.contains('\r'));
        assert!(output.contains("Name: evil\u{FFFD}]0;pwned"));
        // Only the four line breaks of the layout remain
        assert_eq!(output.matches('\n').count(), 4);
    }
}
