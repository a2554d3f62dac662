//! Terminal render target.
//!
//! One-shot mode prints each update as it arrives. Live mode keeps the last
//! health, table and notices and redraws the whole screen on every update.

use super::render::RenderTarget;
use super::view::{HealthView, Notice, NoticeLevel, TableView};
use super::text::{format_health_line, format_monitors_table, sanitize_terminal};
use chrono::{DateTime, Local};
use colored::Colorize;
use std::collections::VecDeque;
use std::io::Write;

/// Notices kept on screen in live mode.
const LIVE_NOTICES: usize = 5;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub struct TerminalRenderer<W> {
    out: W,
    live: bool,
    health: Option<HealthView>,
    table: Option<TableView>,
    notices: VecDeque<Notice>,
    updated_at: Option<DateTime<Local>>,
}

impl<W: Write + Send + 'static> TerminalRenderer<W> {
    /// Print updates one after another.
    pub fn new(out: W) -> Self {
        Self {
            out,
            live: false,
            health: None,
            table: None,
            notices: VecDeque::new(),
            updated_at: None,
        }
    }

    /// Redraw the full screen on every update.
    pub fn live(out: W) -> Self {
        Self {
            live: true,
            ..Self::new(out)
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
        {
            tracing::warn!(error = %e, "Failed to write dashboard output");
        }
    }

    fn frame(&self) -> String {
        let mut frame = String::from(CLEAR_SCREEN);

        let status = match self.health {
            Some(health) => format_health_line(health),
            None => format!("Status: {}", "Checking".dimmed()),
        };
        let updated = self
            .updated_at
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        frame.push_str(&format!(
            "{}   {}   Updated {}\n\n",
            "Uptime Monitor".bold(),
            status,
            updated
        ));

        match &self.table {
            Some(table) => frame.push_str(&table_text(table)),
            None => frame.push_str(&format!("{}\n", "Loading monitors".dimmed())),
        }

        if !self.notices.is_empty() {
            frame.push('\n');
            for notice in &self.notices {
                frame.push_str(&notice_text(notice));
            }
        }

        frame.push_str(&format!(
            "\n{}\n",
            "r + Enter: refresh   q + Enter: quit".dimmed()
        ));
        frame
    }

    fn redraw(&mut self) {
        self.updated_at = Some(Local::now());
        let frame = self.frame();
        self.emit(&frame);
    }
}

impl<W: Write + Send + 'static> RenderTarget for TerminalRenderer<W> {
    fn render_health(&mut self, health: HealthView) {
        self.health = Some(health);
        if self.live {
            self.redraw();
        } else {
            let line = format!("{}\n", format_health_line(health));
            self.emit(&line);
        }
    }

    fn render_monitors(&mut self, table: &TableView) {
        self.table = Some(table.clone());
        if self.live {
            self.redraw();
        } else {
            let text = table_text(table);
            self.emit(&text);
        }
    }

    fn reset_create_form(&mut self) {}

    fn notify(&mut self, notice: Notice) {
        if self.live {
            if self.notices.len() >= LIVE_NOTICES {
                self.notices.pop_front();
            }
            self.notices.push_back(notice);
            self.redraw();
        } else {
            let text = notice_text(&notice);
            self.emit(&text);
        }
    }
}

fn table_text(table: &TableView) -> String {
    match table.placeholder() {
        Some(text) => format!("{}\n", text.dimmed()),
        None => format!("{}\n", format_monitors_table(table.monitors())),
    }
}

fn notice_text(notice: &Notice) -> String {
    let line = format!("! {}", sanitize_terminal(&notice.message));
    let line = match notice.level {
        NoticeLevel::Info => line.cyan(),
        NoticeLevel::Warning => line.yellow(),
        NoticeLevel::Error => line.red(),
    };
    format!("{line}\n")
}
