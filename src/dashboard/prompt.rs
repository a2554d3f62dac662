//! Edit and delete prompts.
//!
//! The dashboard asks a [`Prompter`] for edit values and delete
//! confirmation. Prompts return a result the controller can act on, and an
//! edit can always be cancelled.

use crate::monitor::{Monitor, MonitorForm, MonitorId, DEFAULT_INTERVAL_SECONDS};
use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Run a blocking read, handing the worker's other tasks off first when
/// called from a multi-threaded runtime.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Result of an edit prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The user submitted these raw values
    Submitted(MonitorForm),
    /// The user backed out
    Cancelled,
}

/// Source of user decisions for edit and delete.
pub trait Prompter: Send + Sync + 'static {
    /// Ask for new name, URL and interval. `current` holds the server's
    /// values when they could be fetched.
    fn edit_monitor(&self, id: &MonitorId, current: Option<&Monitor>) -> EditOutcome;

    /// Ask whether the monitor should be deleted.
    fn confirm_delete(&self, id: &MonitorId) -> bool;
}

/// Prompter for contexts without a user: cancels edits, declines deletes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn edit_monitor(&self, _id: &MonitorId, _current: Option<&Monitor>) -> EditOutcome {
        EditOutcome::Cancelled
    }

    fn confirm_delete(&self, _id: &MonitorId) -> bool {
        false
    }
}

/// Values supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPreset {
    pub name: Option<String>,
    pub url: Option<String>,
    pub interval_seconds: Option<String>,
}

/// Line-based prompter over any reader/writer pair.
///
/// Preset values are used without asking. For the rest a prompt is written
/// showing the current value, and an empty answer keeps that value. End of
/// input cancels the edit or declines the delete.
pub struct LinePrompter<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
    preset: EditPreset,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
            preset: EditPreset::default(),
            assume_yes: false,
        }
    }

    pub fn with_preset(mut self, preset: EditPreset) -> Self {
        self.preset = preset;
        self
    }

    /// Confirm deletes without asking.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Write `label` and read one answer. `None` on end of input or I/O failure.
    fn ask(&self, label: &str, default: Option<&str>) -> Option<String> {
        {
            let mut output = self.output.lock().unwrap_or_else(|e| e.into_inner());
            let written = match default {
                Some(d) => write!(output, "{label} [{d}]: "),
                None => write!(output, "{label}: "),
            };
            if written.and_then(|_| output.flush()).is_err() {
                return None;
            }
        }

        let mut line = String::new();
        let read = blocking(|| {
            let mut input = self.input.lock().unwrap_or_else(|e| e.into_inner());
            input.read_line(&mut line)
        });
        match read {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let answer = line.trim_end_matches(['\r', '\n']);
                if answer.is_empty() {
                    Some(default.unwrap_or_default().to_string())
                } else {
                    Some(answer.to_string())
                }
            }
        }
    }

    fn field(&self, preset: &Option<String>, label: &str, default: Option<&str>) -> Option<String> {
        match preset {
            Some(value) => Some(value.clone()),
            None => self.ask(label, default),
        }
    }
}

impl<R, W> Prompter for LinePrompter<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    fn edit_monitor(&self, _id: &MonitorId, current: Option<&Monitor>) -> EditOutcome {
        let current = current.map(MonitorForm::from);
        let default_interval = DEFAULT_INTERVAL_SECONDS.to_string();

        let Some(name) = self.field(
            &self.preset.name,
            "Name",
            current.as_ref().map(|c| c.name.as_str()),
        ) else {
            return EditOutcome::Cancelled;
        };
        let Some(url) = self.field(
            &self.preset.url,
            "URL",
            current.as_ref().map(|c| c.url.as_str()),
        ) else {
            return EditOutcome::Cancelled;
        };
        let Some(interval_seconds) = self.field(
            &self.preset.interval_seconds,
            "Interval (seconds)",
            Some(
                current
                    .as_ref()
                    .map(|c| c.interval_seconds.as_str())
                    .unwrap_or(&default_interval),
            ),
        ) else {
            return EditOutcome::Cancelled;
        };

        EditOutcome::Submitted(MonitorForm {
            name,
            url,
            interval_seconds,
        })
    }

    fn confirm_delete(&self, id: &MonitorId) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.ask(&format!("Delete monitor {id}? [y/N]"), None) {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}
