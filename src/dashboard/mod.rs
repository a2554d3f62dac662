//! Dashboard core.
//!
//! The [`DashboardController`] runs every request/render cycle against an
//! injected [`MonitorApi`](crate::client::MonitorApi), [`RenderTarget`] and
//! [`Prompter`]:
//! - health pill (Operational / Degraded)
//! - monitor table, a direct projection of the last `GET /monitors`
//! - create, edit and delete with re-fetch
//! - periodic polling with stale-response fencing

pub mod controller;
pub mod fence;
pub mod html;
pub mod prompt;
pub mod render;
pub mod terminal;
pub mod text;
pub mod view;

pub use controller::{ControllerSettings, DashboardController, MutationOutcome};
pub use fence::RefreshFence;
pub use html::{escape_html, DomSnapshot, HtmlRenderer};
pub use prompt::{EditOutcome, EditPreset, LinePrompter, NonInteractive, Prompter};
pub use render::RenderTarget;
pub use terminal::TerminalRenderer;
pub use text::sanitize_terminal;
pub use view::{HealthView, Notice, NoticeLevel, TableView};
