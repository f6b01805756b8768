//! Permission gate - the only caller of the OS permission primitives

use thiserror::Error;
use tracing::debug;

use crate::domain::capture::PermissionState;

use super::ports::{OsPermission, OsPermissionStatus, PermissionError, PlatformCapability};

/// Failure of an OS permission primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionGateError {
    #[error("Error checking permissions: {0}")]
    Check(PermissionError),

    #[error("Error requesting permissions: {0}")]
    Request(PermissionError),
}

/// Decides whether notification capture is currently authorized.
///
/// Nothing is cached: every call goes back to the platform and the OS, so a
/// grant revoked from system settings shows up on the next evaluation.
pub struct PermissionGate<C, P>
where
    C: PlatformCapability,
    P: OsPermission,
{
    platform: C,
    permission: P,
}

impl<C, P> PermissionGate<C, P>
where
    C: PlatformCapability,
    P: OsPermission,
{
    /// Create a new permission gate
    pub fn new(platform: C, permission: P) -> Self {
        Self {
            platform,
            permission,
        }
    }

    /// Whether the platform can host capture at all
    pub fn is_platform_supported(&self) -> bool {
        self.platform.is_supported()
    }

    /// Query the current grant without prompting
    pub async fn evaluate(&self) -> Result<PermissionState, PermissionGateError> {
        if let Some(state) = self.unavailable() {
            return Ok(state);
        }

        let status = self
            .permission
            .evaluate()
            .await
            .map_err(PermissionGateError::Check)?;
        let state = to_state(status);
        debug!(%state, "evaluated notification permission");
        Ok(state)
    }

    /// Prompt for access where the platform supports it, then report the grant
    pub async fn request_and_evaluate(&self) -> Result<PermissionState, PermissionGateError> {
        if self.unavailable().is_some() {
            return self.evaluate().await;
        }

        let status = self
            .permission
            .request()
            .await
            .map_err(PermissionGateError::Request)?;
        let state = to_state(status);
        debug!(%state, "requested notification permission");
        Ok(state)
    }

    fn unavailable(&self) -> Option<PermissionState> {
        if !self.platform.is_supported() {
            Some(PermissionState::Unsupported)
        } else if !self.platform.is_capable_device() {
            Some(PermissionState::UnsupportedDevice)
        } else {
            None
        }
    }
}

fn to_state(status: OsPermissionStatus) -> PermissionState {
    match status {
        OsPermissionStatus::Granted => PermissionState::Granted,
        OsPermissionStatus::Denied => PermissionState::Denied,
    }
}
