//! Shared test utilities for uptime integration tests.
//!
//! Provides wiremock fixtures for the monitor API and helpers for building
//! controllers around them.

#![allow(dead_code)]

use std::sync::Arc;
use uptime::client::HttpMonitorApi;
use uptime::config::ApiConfig;
use uptime::dashboard::{DashboardController, EditOutcome, HtmlRenderer, Prompter};
use uptime::monitor::{Monitor, MonitorId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Fixtures
// =============================================================================

/// JSON body for one monitor as the API returns it.
pub fn monitor_json(id: i64, name: &str, url: &str, interval_seconds: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "url": url,
        "interval_seconds": interval_seconds,
    })
}

/// Mount `GET /health` returning `status`.
pub async fn mount_health(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({"status": "ok"})))
        .mount(server)
        .await;
}

/// Mount `GET /monitors` returning `monitors`.
pub async fn mount_monitors(server: &MockServer, monitors: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(monitors))
        .mount(server)
        .await;
}

/// Start a mock API that is healthy and serves `monitors`.
pub async fn start_api(monitors: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    mount_monitors(&server, monitors).await;
    server
}

/// Base URL of a local port with nothing listening on it.
///
/// A dropped `MockServer` goes back to wiremock's pool and keeps answering,
/// so an unreachable API needs a port from a listener we close ourselves.
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Count requests the server received for `method path`.
pub async fn request_count(server: &MockServer, http_method: &str, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == http_method && r.url.path() == request_path)
        .count()
}

// =============================================================================
// Controller Builders
// =============================================================================

pub fn api_for(server: &MockServer) -> Arc<HttpMonitorApi> {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    };
    Arc::new(HttpMonitorApi::new(&config).unwrap())
}

pub type HtmlController<P> = DashboardController<HttpMonitorApi, HtmlRenderer, P>;

pub fn html_controller<P: Prompter>(server: &MockServer, prompter: P) -> HtmlController<P> {
    DashboardController::new(api_for(server), HtmlRenderer::new(), prompter)
}

/// Prompter returning canned answers.
pub struct Scripted {
    pub edit: EditOutcome,
    pub confirm: bool,
}

impl Scripted {
    pub fn confirming() -> Self {
        Self {
            edit: EditOutcome::Cancelled,
            confirm: true,
        }
    }

    pub fn declining() -> Self {
        Self {
            edit: EditOutcome::Cancelled,
            confirm: false,
        }
    }
}

impl Prompter for Scripted {
    fn edit_monitor(&self, _id: &MonitorId, _current: Option<&Monitor>) -> EditOutcome {
        self.edit.clone()
    }

    fn confirm_delete(&self, _id: &MonitorId) -> bool {
        self.confirm
    }
}
