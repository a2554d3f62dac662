//! View models handed to render targets.

use crate::client::ApiError;
use crate::monitor::Monitor;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Indicator colour shown while the API is healthy.
pub const OPERATIONAL_COLOR: &str = "#22c55e";
/// Indicator colour shown after a failed health probe.
pub const DEGRADED_COLOR: &str = "#ef4444";

/// Placeholder row for an empty monitor list.
pub const EMPTY_PLACEHOLDER: &str = "No monitors yet";
/// Placeholder row after a failed monitor fetch.
pub const UNAVAILABLE_PLACEHOLDER: &str = "Unable to load monitors";
/// Status cell shown for every monitor; per-monitor results are not fetched.
pub const PENDING_STATUS: &str = "Pending";

/// Health pill state derived from the last `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthView {
    Operational,
    Degraded,
}

impl HealthView {
    pub fn from_result(result: &Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => HealthView::Operational,
            Err(_) => HealthView::Degraded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthView::Operational => "Operational",
            HealthView::Degraded => "Degraded",
        }
    }

    pub fn indicator_color(self) -> &'static str {
        match self {
            HealthView::Operational => OPERATIONAL_COLOR,
            HealthView::Degraded => DEGRADED_COLOR,
        }
    }

    pub fn is_operational(self) -> bool {
        self == HealthView::Operational
    }
}

/// Contents of the monitor table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "monitors", rename_all = "snake_case")]
pub enum TableView {
    /// One row per monitor, in server order
    Rows(Vec<Monitor>),
    /// The server returned an empty list
    Empty,
    /// The fetch failed
    Unavailable,
}

impl TableView {
    pub fn from_result(result: Result<Vec<Monitor>, ApiError>) -> Self {
        match result {
            Ok(monitors) if monitors.is_empty() => TableView::Empty,
            Ok(monitors) => TableView::Rows(monitors),
            Err(_) => TableView::Unavailable,
        }
    }

    /// Text of the single placeholder row, if the table shows one.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TableView::Rows(_) => None,
            TableView::Empty => Some(EMPTY_PLACEHOLDER),
            TableView::Unavailable => Some(UNAVAILABLE_PLACEHOLDER),
        }
    }

    pub fn monitors(&self) -> &[Monitor] {
        match self {
            TableView::Rows(monitors) => monitors,
            _ => &[],
        }
    }

    /// Number of rows the table renders, counting a placeholder as one.
    pub fn row_count(&self) -> usize {
        match self {
            TableView::Rows(monitors) => monitors.len(),
            _ => 1,
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking message shown next to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}
