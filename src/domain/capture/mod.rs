//! Notification capture domain
//!
//! Value objects for captured notifications, the newest-first log that holds
//! them, the permission state, and the listener session state machine.

pub mod log;
pub mod notification;
pub mod permission;
pub mod session;

pub use log::NotificationLog;
pub use notification::{
    CapturedNotification, NotificationId, RawNotification, PLACEHOLDER_BODY, PLACEHOLDER_TITLE,
};
pub use permission::PermissionState;
pub use session::{InvalidStateTransition, ListenerSession, ListenerState};
