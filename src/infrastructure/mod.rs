//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the host: the session bus, job-control signals,
//! the desktop notification daemon and the XDG config directory.

pub mod config;
pub mod lifecycle;
pub mod notification;
pub mod permission;
pub mod platform;
pub mod source;

// Re-export adapters
pub use config::XdgConfigStore;
pub use lifecycle::{create_lifecycle, NoOpLifecycle};
pub use notification::{create_notifier, NotifyRustNotifier};
pub use permission::{DbusMonitorPermission, StaticPermission};
pub use platform::{DesktopPlatform, StaticPlatform};
pub use source::{DbusMonitorSource, NotifyParser, ReplaySource};
