//! Application configuration value object

use std::num::NonZeroUsize;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Default number of notifications kept in the log
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// Default timestamp format for printed notifications
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Default D-Bus monitor command
pub const DEFAULT_MONITOR_COMMAND: &str = "dbus-monitor";

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinuxConfig {
    pub monitor_command: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub max_entries: Option<usize>,
    pub show_source: Option<bool>,
    pub time_format: Option<String>,
    pub linux: Option<LinuxConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            max_entries: Some(DEFAULT_MAX_ENTRIES),
            show_source: Some(true),
            time_format: Some(DEFAULT_TIME_FORMAT.to_string()),
            linux: Some(LinuxConfig {
                monitor_command: Some(DEFAULT_MONITOR_COMMAND.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            max_entries: other.max_entries.or(self.max_entries),
            show_source: other.show_source.or(self.show_source),
            time_format: other.time_format.or(self.time_format),
            linux: Self::merge_linux_config(self.linux, other.linux),
        }
    }

    /// Merge Linux config sections
    fn merge_linux_config(
        base: Option<LinuxConfig>,
        other: Option<LinuxConfig>,
    ) -> Option<LinuxConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(LinuxConfig {
                monitor_command: o.monitor_command.or(b.monitor_command),
            }),
        }
    }

    /// Get the log retention bound, or the default if not set or zero
    pub fn max_entries_or_default(&self) -> NonZeroUsize {
        self.max_entries
            .and_then(NonZeroUsize::new)
            .or_else(|| NonZeroUsize::new(DEFAULT_MAX_ENTRIES))
            .unwrap_or(NonZeroUsize::MIN)
    }

    /// Get show_source setting, or true if not set
    pub fn show_source_or_default(&self) -> bool {
        self.show_source.unwrap_or(true)
    }

    /// Get time format, or the default if not set/invalid
    pub fn time_format_or_default(&self) -> &str {
        self.time_format
            .as_deref()
            .filter(|f| is_valid_time_format(f))
            .unwrap_or(DEFAULT_TIME_FORMAT)
    }

    /// Get monitor command, or "dbus-monitor" if not set
    pub fn monitor_command_or_default(&self) -> &str {
        self.linux
            .as_ref()
            .and_then(|l| l.monitor_command.as_deref())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_MONITOR_COMMAND)
    }
}

/// Check that a chrono strftime format string parses cleanly
pub fn is_valid_time_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
