//! Permission state value object

use std::fmt;

/// Whether notification capture is currently authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionState {
    /// Not evaluated yet
    #[default]
    Unknown,
    /// The platform cannot host notification capture at all
    Unsupported,
    /// The platform could, but this device cannot
    UnsupportedDevice,
    Denied,
    Granted,
}

impl PermissionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Unsupported => "unsupported",
            Self::UnsupportedDevice => "unsupported-device",
            Self::Denied => "denied",
            Self::Granted => "granted",
        }
    }

    pub fn is_granted(&self) -> bool {
        *self == Self::Granted
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
