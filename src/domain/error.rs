//! Domain error types

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::capture::PermissionState;

/// Failures surfaced to the presentation layer while capturing.
///
/// Malformed notification events are not represented here: they degrade to
/// placeholder fields at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Notification capture is not supported on this platform")]
    UnsupportedPlatform,

    #[error("Notification capture is not available on this device")]
    UnsupportedDevice,

    #[error("Please enable notification access in your device settings")]
    PermissionDenied,

    #[error("{0}")]
    OsPrimitiveFailure(String),
}

impl CaptureError {
    /// Failure implied by a permission state, if any
    pub fn for_permission(state: PermissionState) -> Option<Self> {
        match state {
            PermissionState::Unsupported => Some(Self::UnsupportedPlatform),
            PermissionState::UnsupportedDevice => Some(Self::UnsupportedDevice),
            PermissionState::Denied => Some(Self::PermissionDenied),
            PermissionState::Unknown | PermissionState::Granted => None,
        }
    }

    /// Whether the presentation layer should show guidance for this failure
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::OsPrimitiveFailure(_))
    }
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("No config directory found; set XDG_CONFIG_HOME or HOME")]
    NoConfigDir,

    #[error("Failed to read {}: {message}", path.display())]
    ReadError { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    WriteError { path: PathBuf, message: String },

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_failure_displays_diagnostic() {
        let err = CaptureError::OsPrimitiveFailure("Error checking permissions: boom".to_string());
        assert_eq!(err.to_string(), "Error checking permissions: boom");
    }

    #[test]
    fn denied_and_os_failures_are_user_actionable() {
        assert!(CaptureError::PermissionDenied.is_user_actionable());
        assert!(CaptureError::OsPrimitiveFailure("x".into()).is_user_actionable());
        assert!(!CaptureError::UnsupportedPlatform.is_user_actionable());
        assert!(!CaptureError::UnsupportedDevice.is_user_actionable());
    }

    #[test]
    fn permission_states_map_to_failures() {
        assert_eq!(
            CaptureError::for_permission(PermissionState::Denied),
            Some(CaptureError::PermissionDenied)
        );
        assert_eq!(
            CaptureError::for_permission(PermissionState::Unsupported),
            Some(CaptureError::UnsupportedPlatform)
        );
        assert_eq!(
            CaptureError::for_permission(PermissionState::UnsupportedDevice),
            Some(CaptureError::UnsupportedDevice)
        );
        assert!(CaptureError::for_permission(PermissionState::Granted).is_none());
        assert!(CaptureError::for_permission(PermissionState::Unknown).is_none());
    }

    #[test]
    fn validation_error_display() {
        let err = ConfigError::ValidationError {
            key: "max_entries".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert!(err.to_string().contains("max_entries"));
    }

    #[test]
    fn file_errors_name_the_path() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("/tmp/nc/config.toml"),
            message: "expected a value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse /tmp/nc/config.toml: expected a value"
        );
        assert!(ConfigError::AlreadyExists(PathBuf::from("/tmp/nc/config.toml"))
            .to_string()
            .ends_with("/tmp/nc/config.toml"));
    }
}
