//! Permission adapters

mod dbus_monitor;

pub use dbus_monitor::DbusMonitorPermission;

use async_trait::async_trait;

use crate::application::ports::{OsPermission, OsPermissionStatus, PermissionError};

/// Permission with a fixed answer, for replaying recorded events
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission(pub OsPermissionStatus);

impl StaticPermission {
    pub const fn granted() -> Self {
        Self(OsPermissionStatus::Granted)
    }
}

#[async_trait]
impl OsPermission for StaticPermission {
    async fn evaluate(&self) -> Result<OsPermissionStatus, PermissionError> {
        Ok(self.0)
    }

    async fn request(&self) -> Result<OsPermissionStatus, PermissionError> {
        Ok(self.0)
    }
}
