//! Notification source that eavesdrops on the session bus with dbus-monitor

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::application::ports::{EventSink, NotificationSource, SourceError, SourceEvent, Subscription};

use super::notify_parser::NotifyParser;

/// Match rule selecting Notify calls to the notification daemon
pub const NOTIFY_MATCH_RULE: &str = "interface='org.freedesktop.Notifications',member='Notify'";

/// dbus-monitor notification source
///
/// Each subscription runs its own monitor process. Releasing the
/// subscription aborts the reader task, which kills the process.
pub struct DbusMonitorSource {
    command: String,
}

impl DbusMonitorSource {
    /// Create a source using the given monitor command
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Build monitor args
    fn build_args() -> [&'static str; 2] {
        ["--session", NOTIFY_MATCH_RULE]
    }
}

impl Default for DbusMonitorSource {
    fn default() -> Self {
        Self::new(crate::domain::config::DEFAULT_MONITOR_COMMAND)
    }
}

impl NotificationSource for DbusMonitorSource {
    fn subscribe(&self, sink: EventSink<SourceEvent>) -> Result<Subscription, SourceError> {
        let runtime = Handle::try_current().map_err(|e| SourceError::SubscribeFailed(e.to_string()))?;

        let mut child = Command::new(&self.command)
            .args(Self::build_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SourceError::SubscribeFailed(format!("{}: {}", self.command, e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SourceError::SubscribeFailed("monitor stdout unavailable".to_string()))?;

        let command = self.command.clone();
        let task = runtime.spawn(async move {
            // Owned by the task so aborting it kills the process
            let _child = child;
            let mut lines = BufReader::new(stdout).lines();
            let mut parser = NotifyParser::new();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if let Some(raw) = parser.push_line(&line) {
                            sink(Ok(raw));
                        }
                    }
                    Ok(None) => {
                        if let Some(raw) = parser.finish() {
                            sink(Ok(raw));
                        }
                        warn!(%command, "monitor exited");
                        sink(Err(SourceError::Disconnected(format!("{} exited", command))));
                        break;
                    }
                    Err(e) => {
                        warn!(%command, error = %e, "failed to read monitor output");
                        sink(Err(SourceError::Disconnected(e.to_string())));
                        break;
                    }
                }
            }
        });

        debug!(command = %self.command, "monitor started");
        Ok(Subscription::new("dbus-monitor", move || task.abort()))
    }
}
