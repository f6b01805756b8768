//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod permission;
pub mod source;

// Re-export common types
pub use config::ConfigStore;
pub use notifier::{NotificationError, Notifier};
pub use permission::{OsPermission, OsPermissionStatus, PermissionError, PlatformCapability};
pub use source::{
    AppLifecycle, AppState, EventSink, NotificationSource, SourceError, SourceEvent, Subscription,
};
