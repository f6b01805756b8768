//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use chrono::Local;

use crate::domain::capture::{CapturedNotification, ListenerState, PermissionState};
use crate::domain::error::CaptureError;

/// Marks where a multi-line title or body was joined onto one line
const LINE_BREAK: &str = " ⏎ ";

/// Options controlling how captured notifications are printed
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// chrono format for the timestamp column
    pub time_format: String,
    /// Print the originating application
    pub show_source: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            time_format: crate::domain::config::DEFAULT_TIME_FORMAT.to_string(),
            show_source: true,
        }
    }
}

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    display: DisplayOptions,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self::with_display(DisplayOptions::default())
    }

    /// Create a presenter with notification display options
    pub fn with_display(display: DisplayOptions) -> Self {
        Self {
            spinner: None,
            display,
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print one captured notification to stdout
    pub fn notification(&self, entry: &CapturedNotification) {
        println!("{}", self.format_notification(entry));
    }

    /// Format a captured notification as a single line:
    /// `[time] (source) title: body`, in local time. Line breaks inside
    /// the title or body are shown as `⏎`.
    pub fn format_notification(&self, entry: &CapturedNotification) -> String {
        let time = entry
            .timestamp()
            .with_timezone(&Local)
            .format(&self.display.time_format);
        let mut line = format!("[{}]", time).dimmed().to_string();

        if self.display.show_source {
            if let Some(source) = entry.source() {
                line.push(' ');
                line.push_str(&format!("({})", source).cyan().to_string());
            }
        }

        line.push(' ');
        line.push_str(&single_line(entry.title()).bold().to_string());
        line.push_str(": ");
        line.push_str(&single_line(entry.body()));
        line
    }

    /// Print a capture failure, as a warning when the user can act on it
    pub fn failure(&self, error: &CaptureError) {
        eprintln!("{}", self.format_failure(error));
    }

    fn format_failure(&self, error: &CaptureError) -> String {
        if error.is_user_actionable() {
            format!("{} {}", "⚠".yellow(), error)
        } else {
            format!("{} {}", "ℹ".cyan(), error)
        }
    }

    /// Print the permission state
    pub fn permission_status(&self, permission: PermissionState) {
        let label = match permission {
            PermissionState::Granted => permission.as_str().green(),
            PermissionState::Denied => permission.as_str().red(),
            _ => permission.as_str().yellow(),
        };
        eprintln!("{} Permission: {}", "●".cyan(), label);
    }

    /// Print the listener state
    pub fn listener_status(&self, listener: ListenerState) {
        let label = match listener {
            ListenerState::Active => listener.as_str().green(),
            ListenerState::Error => listener.as_str().red(),
            _ => listener.as_str().yellow(),
        };
        eprintln!("{} Listener: {}", "●".cyan(), label);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn single_line(text: &str) -> String {
    if text.contains(['\n', '\r']) {
        text.lines().collect::<Vec<_>>().join(LINE_BREAK)
    } else {
        text.to_string()
    }
}

/// What the user can do about a permission state, if anything
pub fn permission_guidance(state: PermissionState) -> Option<&'static str> {
    match state {
        PermissionState::Granted => None,
        PermissionState::Denied => Some(
            "Install dbus-monitor (dbus package) or set linux.monitor_command to a working monitor",
        ),
        PermissionState::UnsupportedDevice => {
            Some("No D-Bus session bus found; run inside a desktop session")
        }
        PermissionState::Unsupported => Some("Notification capture is only available on Linux"),
        PermissionState::Unknown => Some("Notification access has not been checked yet"),
    }
}
