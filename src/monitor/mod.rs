//! Monitor data model.
//!
//! Monitors are owned by the server. The client only ever holds the most
//! recent list it fetched and the payloads it sends back.

mod error;
mod form;

pub use error::FormError;
pub use form::{coerce_interval, MonitorForm, DEFAULT_INTERVAL_SECONDS};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned monitor identifier.
///
/// Servers may encode ids as JSON numbers or strings; both are accepted and
/// kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MonitorId(String);

impl MonitorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MonitorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MonitorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for MonitorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => MonitorId(s),
            RawId::Signed(n) => MonitorId(n.to_string()),
            RawId::Unsigned(n) => MonitorId(n.to_string()),
        })
    }
}

/// A URL checked by the server on a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: MonitorId,
    pub name: String,
    pub url: String,
    pub interval_seconds: i64,
}

/// Body of `POST /monitors` and `PUT /monitors/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorPayload {
    pub name: String,
    pub url: String,
    pub interval_seconds: i64,
}

impl From<&Monitor> for MonitorForm {
    fn from(monitor: &Monitor) -> Self {
        MonitorForm::new(
            monitor.name.clone(),
            monitor.url.clone(),
            monitor.interval_seconds.to_string(),
        )
    }
}
