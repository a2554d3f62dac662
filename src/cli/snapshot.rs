//! Snapshot command implementation

use crate::cli::SnapshotArgs;
use crate::dashboard::{DashboardController, HtmlRenderer, NonInteractive};

/// Handle snapshot command
///
/// Runs one refresh cycle and renders the resulting page.
pub async fn handle_snapshot(args: &SnapshotArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (_, api) = args.connection.connect()?;
    let controller = DashboardController::new(api, HtmlRenderer::new(), NonInteractive);

    let (health, table) = controller.refresh().await;
    tracing::debug!(
        health = health.label(),
        rows = table.row_count(),
        "Snapshot refreshed"
    );

    let page = controller.target().await.render_page(&args.title);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &page)?;
            Ok(format!("✓ Wrote dashboard snapshot to {}", path.display()))
        }
        None => Ok(page),
    }
}
