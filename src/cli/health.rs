//! Health command implementation

use crate::cli::HealthArgs;
use crate::dashboard::{DashboardController, HealthView, NonInteractive, TerminalRenderer};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: HealthView,
    pub api_url: String,
    pub checked_at: DateTime<Utc>,
}

/// Handle health command
pub async fn handle_health(args: &HealthArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (config, api) = args.connection.connect()?;
    let controller =
        DashboardController::new(api, TerminalRenderer::new(Vec::new()), NonInteractive);

    let health = controller.refresh_health().await;

    if args.json {
        let report = HealthReport {
            status: health,
            api_url: config.api.base_url,
            checked_at: Utc::now(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        let rendered = controller.into_target().into_inner();
        Ok(String::from_utf8_lossy(&rendered).trim_end().to_string())
    }
}
