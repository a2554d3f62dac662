//! HTML render target.
//!
//! Keeps an in-memory snapshot of the dashboard page: the health pill, the
//! `monitorsBody` table body, the create form fields and the notice list.
//! Every value that came from the server or the user is escaped before it is
//! placed into markup.

use super::render::RenderTarget;
use super::view::{HealthView, Notice, NoticeLevel, TableView, PENDING_STATUS};
use crate::monitor::{Monitor, MonitorForm};
use std::fmt::Write;

/// Indicator colour before the first health probe completes.
pub const UNKNOWN_COLOR: &str = "#94a3b8";

/// Maximum number of notices kept on the page (oldest dropped first).
const MAX_NOTICES: usize = 20;

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// State of the page elements the dashboard writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSnapshot {
    /// `#healthText` text content
    pub health_text: String,
    /// `#healthPill .dot` background colour
    pub health_dot_color: String,
    /// `#monitorsBody` inner HTML
    pub monitors_body: String,
    /// `#createForm` field values
    pub create_form: MonitorForm,
    /// Notices, oldest first
    pub notices: Vec<Notice>,
}

impl Default for DomSnapshot {
    fn default() -> Self {
        Self {
            health_text: "Checking".to_string(),
            health_dot_color: UNKNOWN_COLOR.to_string(),
            monitors_body: placeholder_row("Loading monitors"),
            create_form: MonitorForm::default(),
            notices: Vec::new(),
        }
    }
}

impl DomSnapshot {
    /// Number of `<tr>` rows currently in `#monitorsBody`.
    pub fn row_count(&self) -> usize {
        self.monitors_body.matches("<tr>").count()
    }
}

/// Render target producing the dashboard page markup.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    dom: DomSnapshot,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dom(&self) -> &DomSnapshot {
        &self.dom
    }

    /// Fill in the create form, as a user typing into it would.
    pub fn fill_create_form(&mut self, form: MonitorForm) {
        self.dom.create_form = form;
    }

    /// Render a complete standalone page around the current snapshot.
    pub fn render_page(&self, title: &str) -> String {
        let title = escape_html(title);
        let form = &self.dom.create_form;
        let mut notices = String::new();
        for notice in &self.dom.notices {
            let _ = writeln!(
                notices,
                r#"      <li class="notice notice-{}">{}</li>"#,
                notice_class(notice.level),
                escape_html(&notice.message)
            );
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 2rem; }}
    .pill {{ display: inline-flex; align-items: center; gap: .5rem; }}
    .dot {{ width: .75rem; height: .75rem; border-radius: 50%; display: inline-block; }}
    .muted {{ color: #64748b; }}
    table {{ border-collapse: collapse; width: 100%; }}
    td, th {{ padding: .4rem .6rem; border-bottom: 1px solid #e2e8f0; text-align: left; }}
    .notice-error {{ color: #b91c1c; }}
    .notice-warning {{ color: #b45309; }}
  </style>
</head>
<body>
  <header>
    <h1>{title}</h1>
    <span id="healthPill" class="pill"><span class="dot" style="background: {dot}"></span><span id="healthText">{health}</span></span>
    <button id="refreshBtn" class="btn">Refresh</button>
  </header>
  <section>
    <form id="createForm">
      <input name="name" placeholder="Name" value="{name}" required>
      <input name="url" placeholder="https://example.com" value="{url}" required>
      <input name="interval_seconds" type="number" min="1" value="{interval}" required>
      <button class="btn" type="submit">Add monitor</button>
    </form>
    <ul id="notices">
{notices}    </ul>
  </section>
  <table>
    <thead>
      <tr><th>Name</th><th>URL</th><th>Interval (s)</th><th>Status</th><th>Actions</th></tr>
    </thead>
    <tbody id="monitorsBody">
{body}
    </tbody>
  </table>
</body>
</html>
"#,
            dot = escape_html(&self.dom.health_dot_color),
            health = escape_html(&self.dom.health_text),
            name = escape_html(&form.name),
            url = escape_html(&form.url),
            interval = escape_html(&form.interval_seconds),
            body = self.dom.monitors_body,
        )
    }
}

impl RenderTarget for HtmlRenderer {
    fn render_health(&mut self, health: HealthView) {
        self.dom.health_text = health.label().to_string();
        self.dom.health_dot_color = health.indicator_color().to_string();
    }

    fn render_monitors(&mut self, table: &TableView) {
        self.dom.monitors_body = match table.placeholder() {
            Some(text) => placeholder_row(text),
            None => table
                .monitors()
                .iter()
                .map(monitor_row)
                .collect::<Vec<_>>()
                .join("\n"),
        };
    }

    fn reset_create_form(&mut self) {
        self.dom.create_form = MonitorForm::default();
    }

    fn notify(&mut self, notice: Notice) {
        if self.dom.notices.len() >= MAX_NOTICES {
            self.dom.notices.remove(0);
        }
        self.dom.notices.push(notice);
    }
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

fn placeholder_row(text: &str) -> String {
    format!(
        r#"<tr><td colspan="5" class="muted">{}</td></tr>"#,
        escape_html(text)
    )
}

fn monitor_row(monitor: &Monitor) -> String {
    let id = escape_html(monitor.id.as_str());
    format!(
        concat!(
            "<tr>",
            "<td>{name}</td>",
            "<td>{url}</td>",
            "<td>{interval}</td>",
            r#"<td><span class="muted">{status}</span></td>"#,
            r#"<td><button class="btn" data-edit="{id}">Edit</button> "#,
            r#"<button class="btn" data-delete="{id}">Delete</button></td>"#,
            "</tr>"
        ),
        name = escape_html(&monitor.name),
        url = escape_html(&monitor.url),
        interval = monitor.interval_seconds,
        status = PENDING_STATUS,
        id = id,
    )
}
