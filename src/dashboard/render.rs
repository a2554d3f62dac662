//! Render target abstraction.

use super::view::{HealthView, Notice, TableView};

/// Something the dashboard can draw into.
///
/// Calls are made with the controller's render lock held, one at a time.
pub trait RenderTarget: Send + 'static {
    /// Update the health pill.
    fn render_health(&mut self, health: HealthView);

    /// Replace the monitor table body wholesale.
    fn render_monitors(&mut self, table: &TableView);

    /// Clear the create form after a successful submission.
    fn reset_create_form(&mut self);

    /// Show a non-blocking notice.
    fn notify(&mut self, notice: Notice);
}
