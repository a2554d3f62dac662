//! Monitor API client.
//!
//! [`MonitorApi`] abstracts the REST API the dashboard talks to so the
//! controller can be driven by the reqwest client in production and by an
//! in-memory double in tests.

mod error;
mod http;

pub use error::ApiError;
pub use http::HttpMonitorApi;

use crate::monitor::{Monitor, MonitorId, MonitorPayload};
use async_trait::async_trait;

/// Operations exposed by the uptime-monitor API.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn MonitorApi>`.
#[async_trait]
pub trait MonitorApi: Send + Sync + 'static {
    /// `GET /health`. Any 2xx reply is healthy; the body is ignored.
    async fn check_health(&self) -> Result<(), ApiError>;

    /// `GET /monitors`, in server order.
    async fn list_monitors(&self) -> Result<Vec<Monitor>, ApiError>;

    /// `GET /monitors/{id}`.
    async fn get_monitor(&self, id: &MonitorId) -> Result<Monitor, ApiError>;

    /// `POST /monitors`.
    async fn create_monitor(&self, payload: &MonitorPayload) -> Result<(), ApiError>;

    /// `PUT /monitors/{id}`, replacing name, url and interval.
    async fn update_monitor(&self, id: &MonitorId, payload: &MonitorPayload)
        -> Result<(), ApiError>;

    /// `DELETE /monitors/{id}`.
    async fn delete_monitor(&self, id: &MonitorId) -> Result<(), ApiError>;
}
