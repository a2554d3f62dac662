//! Error types for monitor API calls.

use thiserror::Error;

/// Errors returned by [`super::MonitorApi`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// The API answered with a non-2xx status.
    #[error("API error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The configured base URL cannot carry endpoint paths.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// HTTP status for upstream errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
