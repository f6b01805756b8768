//! Notification access check backed by dbus-monitor

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{OsPermission, OsPermissionStatus, PermissionError};

/// Grants access when the D-Bus monitor can be executed.
///
/// Eavesdropping on the session bus needs no prompt on a desktop session, so
/// `request` performs the same probe as `evaluate`.
pub struct DbusMonitorPermission {
    command: String,
}

impl DbusMonitorPermission {
    /// Create a permission probe for the given monitor command
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    async fn probe(&self) -> Result<OsPermissionStatus, std::io::Error> {
        let result = Command::new(&self.command)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => Ok(OsPermissionStatus::Granted),
            Ok(status) => {
                debug!(command = %self.command, %status, "monitor probe failed");
                Ok(OsPermissionStatus::Denied)
            }
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                debug!(command = %self.command, error = %e, "monitor not executable");
                Ok(OsPermissionStatus::Denied)
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for DbusMonitorPermission {
    fn default() -> Self {
        Self::new(crate::domain::config::DEFAULT_MONITOR_COMMAND)
    }
}

#[async_trait]
impl OsPermission for DbusMonitorPermission {
    async fn evaluate(&self) -> Result<OsPermissionStatus, PermissionError> {
        self.probe()
            .await
            .map_err(|e| PermissionError::QueryFailed(e.to_string()))
    }

    async fn request(&self) -> Result<OsPermissionStatus, PermissionError> {
        self.probe()
            .await
            .map_err(|e| PermissionError::RequestFailed(e.to_string()))
    }
}
