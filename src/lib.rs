//! notif-capture - capture desktop notifications posted by other applications
//!
//! This crate observes notifications other applications show on the desktop,
//! gated on an OS-level permission, and keeps them in a bounded, newest-first
//! in-memory log.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Captured notifications, the log, permission and listener states, errors
//! - **Application**: The capture controller, permission gate, listener lifecycle and port traits
//! - **Infrastructure**: Host adapters (dbus-monitor, SIGCONT, notify-rust, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
