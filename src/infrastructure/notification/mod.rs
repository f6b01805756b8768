//! Notification sender module
//!
//! Emits desktop notifications through notify-rust. The `probe` command uses
//! it to check that the capture loop sees what the desktop shows.

mod notify_rust;

pub use notify_rust::NotifyRustNotifier;

use crate::application::ports::Notifier;

/// Create the default notifier for the current platform
pub fn create_notifier() -> Box<dyn Notifier> {
    Box::new(NotifyRustNotifier::new())
}
