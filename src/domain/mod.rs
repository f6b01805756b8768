//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod error;

// Re-export common types
pub use capture::{
    CapturedNotification, ListenerSession, ListenerState, NotificationId, NotificationLog,
    PermissionState, RawNotification,
};
pub use config::AppConfig;
pub use error::*;
