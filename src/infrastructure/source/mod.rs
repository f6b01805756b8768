//! Notification source adapters
//!
//! The live source eavesdrops on the session bus through dbus-monitor;
//! the replay source feeds recorded events through the same pipeline.

mod dbus_monitor;
mod notify_parser;
mod replay;

pub use dbus_monitor::{DbusMonitorSource, NOTIFY_MATCH_RULE};
pub use notify_parser::NotifyParser;
pub use replay::ReplaySource;
