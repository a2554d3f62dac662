//! Error types for monitor form coercion.

use thiserror::Error;

/// Problems found while turning raw form input into a [`super::MonitorPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field was left empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The interval could not be read as a whole number.
    #[error("interval must be a whole number of seconds, got '{0}'")]
    InvalidInterval(String),

    /// The interval coerced to zero where a positive value is needed.
    #[error("interval must be greater than zero")]
    ZeroInterval,
}
