//! Platform and OS permission port interfaces

use async_trait::async_trait;
use thiserror::Error;

/// Permission primitive errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("Failed to query permission: {0}")]
    QueryFailed(String),

    #[error("Failed to request permission: {0}")]
    RequestFailed(String),
}

/// Status reported by the OS permission primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsPermissionStatus {
    Granted,
    Denied,
}

/// Port for platform detection
pub trait PlatformCapability: Send + Sync {
    /// Whether this runtime category can host notification capture at all
    fn is_supported(&self) -> bool;

    /// Whether the current device can honor capture, given platform support
    fn is_capable_device(&self) -> bool;
}

/// Port for the OS notification-access permission
#[async_trait]
pub trait OsPermission: Send + Sync {
    /// Query the current grant without prompting the user.
    async fn evaluate(&self) -> Result<OsPermissionStatus, PermissionError>;

    /// Ask the user for access. May wait on user interaction for an
    /// unbounded time. Re-confirms an existing grant without prompting.
    async fn request(&self) -> Result<OsPermissionStatus, PermissionError>;
}
