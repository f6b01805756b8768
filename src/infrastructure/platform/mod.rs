//! Platform detection adapters

use std::env;

use crate::application::ports::PlatformCapability;

/// Environment variable pointing at the D-Bus session bus
pub const SESSION_BUS_ENV: &str = "DBUS_SESSION_BUS_ADDRESS";

/// Desktop platform detection.
///
/// Capture is supported on Linux desktops; a device without a D-Bus session
/// bus (headless, containers, plain TTY) cannot observe notifications.
#[derive(Debug, Clone)]
pub struct DesktopPlatform {
    session_bus: Option<String>,
}

impl DesktopPlatform {
    /// Detect the current session from the environment
    pub fn detect() -> Self {
        Self::with_session_bus(env::var(SESSION_BUS_ENV).ok())
    }

    /// Create with an explicit session bus address
    pub fn with_session_bus(address: Option<String>) -> Self {
        Self {
            session_bus: address.filter(|a| !a.trim().is_empty()),
        }
    }

    pub fn session_bus(&self) -> Option<&str> {
        self.session_bus.as_deref()
    }
}

impl PlatformCapability for DesktopPlatform {
    fn is_supported(&self) -> bool {
        cfg!(target_os = "linux")
    }

    fn is_capable_device(&self) -> bool {
        self.session_bus.is_some()
    }
}

/// Fixed platform answers, for replaying recorded events
#[derive(Debug, Clone, Copy)]
pub struct StaticPlatform {
    pub supported: bool,
    pub capable: bool,
}

impl StaticPlatform {
    /// A platform that supports capture on a capable device
    pub const fn capable() -> Self {
        Self {
            supported: true,
            capable: true,
        }
    }
}

impl PlatformCapability for StaticPlatform {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn is_capable_device(&self) -> bool {
        self.capable
    }
}
