//! Application layer - Use cases and port interfaces
//!
//! Contains the capture controller, its permission gate and listener
//! lifecycle, and the trait definitions for host interactions.

pub mod capture;
pub mod listeners;
pub mod permission_gate;
pub mod ports;

// Re-export use cases
pub use capture::{CaptureConfig, CaptureController, CaptureSnapshot, CaptureUpdate};
pub use listeners::{CaptureEvent, ListenerLifecycle};
pub use permission_gate::{PermissionGate, PermissionGateError};
