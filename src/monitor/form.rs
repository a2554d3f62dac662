//! Raw form input and its coercion into request payloads.
//!
//! The create form and the edit prompt both hand over three strings. The
//! interval string is read the way a browser's `Number()` would read it,
//! restricted to whole numbers since the API stores an integer.

use super::error::FormError;
use super::MonitorPayload;
use serde::{Deserialize, Serialize};

/// Default interval offered by the edit prompt and `monitors add`.
pub const DEFAULT_INTERVAL_SECONDS: i64 = 60;

/// Field values as typed by the user, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorForm {
    pub name: String,
    pub url: String,
    pub interval_seconds: String,
}

impl MonitorForm {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        interval_seconds: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            interval_seconds: interval_seconds.into(),
        }
    }

    /// Build the POST body for the create form.
    ///
    /// Name and URL must be present; the interval is coerced but any whole
    /// number is passed through, zero included.
    pub fn to_create_payload(&self) -> Result<MonitorPayload, FormError> {
        if self.name.is_empty() {
            return Err(FormError::MissingField("name"));
        }
        if self.url.is_empty() {
            return Err(FormError::MissingField("url"));
        }

        Ok(MonitorPayload {
            name: self.name.clone(),
            url: self.url.clone(),
            interval_seconds: coerce_interval(&self.interval_seconds)?,
        })
    }

    /// Build the PUT body for an edit.
    ///
    /// Any falsy value (empty name, empty URL, zero or unreadable interval)
    /// rejects the edit.
    pub fn to_edit_payload(&self) -> Result<MonitorPayload, FormError> {
        let payload = self.to_create_payload()?;
        if payload.interval_seconds == 0 {
            return Err(FormError::ZeroInterval);
        }
        Ok(payload)
    }
}

/// Read an interval string as a whole number.
///
/// Surrounding whitespace is ignored and an empty string reads as `0`.
/// Exponent and fractional notation are accepted when the value is integral
/// (`"1e3"`, `"30.0"`).
pub fn coerce_interval(raw: &str) -> Result<i64, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        _ => Err(FormError::InvalidInterval(raw.to_string())),
    }
}
