//! reqwest-backed implementation of [`MonitorApi`].

use super::{ApiError, MonitorApi};
use crate::config::ApiConfig;
use crate::monitor::{Monitor, MonitorId, MonitorPayload};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use std::time::Duration;

/// Longest upstream error message kept in an [`ApiError::Upstream`].
const MAX_ERROR_MESSAGE_LEN: usize = 512;

/// HTTP client for the monitor API.
///
/// Handles:
/// - Health probe via GET /health
/// - Listing via GET /monitors, single fetch via GET /monitors/{id}
/// - Create via POST /monitors
/// - Update and delete via PUT / DELETE /monitors/{id}
pub struct HttpMonitorApi {
    /// Base URL, possibly with a path prefix (e.g. "http://host/uptime")
    base_url: Url,
    /// Shared HTTP client for connection pooling
    client: Client,
    /// Timeout reported in [`ApiError::Timeout`]
    timeout_seconds: u64,
}

/// Error body returned by FastAPI-style servers.
#[derive(Deserialize)]
struct ErrorDetail {
    detail: serde_json::Value,
}

impl HttpMonitorApi {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::with_client(&config.base_url, client, config.timeout_seconds)
    }

    /// Create a client with a custom HTTP client (for testing).
    pub fn with_client(
        base_url: &str,
        client: Client,
        timeout_seconds: u64,
    ) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            client,
            timeout_seconds,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn monitor_endpoint(&self, id: &MonitorId) -> Result<Url, ApiError> {
        self.endpoint(&["monitors", id.as_str()])
    }

    /// Send a request and turn transport failures and non-2xx replies into errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| classify_error(e, self.timeout_seconds))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Upstream {
            status: status.as_u16(),
            message: upstream_message(&body, status.canonical_reason()),
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Classify reqwest error into ApiError.
fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(timeout_seconds)
    } else if e.is_decode() {
        ApiError::InvalidResponse(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Pick a readable message out of an error body.
///
/// Prefers a `detail` field, then the raw body, then the status reason.
fn upstream_message(body: &str, reason: Option<&str>) -> String {
    let mut message = match serde_json::from_str::<ErrorDetail>(body) {
        Ok(ErrorDetail {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorDetail { detail }) => detail.to_string(),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => reason.unwrap_or("unknown error").to_string(),
    };

    if message.len() > MAX_ERROR_MESSAGE_LEN {
        let mut cut = MAX_ERROR_MESSAGE_LEN;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
    }
    message
}

#[async_trait]
impl MonitorApi for HttpMonitorApi {
    async fn check_health(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["health"])?;
        self.send(self.client.get(url)).await?;
        Ok(())
    }

    async fn list_monitors(&self) -> Result<Vec<Monitor>, ApiError> {
        let url = self.endpoint(&["monitors"])?;
        let response = self.send(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn get_monitor(&self, id: &MonitorId) -> Result<Monitor, ApiError> {
        let url = self.monitor_endpoint(id)?;
        let response = self.send(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn create_monitor(&self, payload: &MonitorPayload) -> Result<(), ApiError> {
        let url = self.endpoint(&["monitors"])?;
        self.send(self.client.post(url).json(payload)).await?;
        Ok(())
    }

    async fn update_monitor(&self, id: &MonitorId, payload: &MonitorPayload) -> Result<(), ApiError> {
        let url = self.monitor_endpoint(id)?;
        self.send(self.client.put(url).json(payload)).await?;
        Ok(())
    }

    async fn delete_monitor(&self, id: &MonitorId) -> Result<(), ApiError> {
        let url = self.monitor_endpoint(id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
