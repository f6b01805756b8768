//! App lifecycle adapters

#[cfg(unix)]
mod sigcont;

#[cfg(unix)]
pub use sigcont::SigcontLifecycle;

use crate::application::ports::{AppLifecycle, AppState, EventSink, SourceError, Subscription};

/// Lifecycle that never leaves the foreground.
///
/// Used where no foreground signal exists, such as replaying recorded
/// events or non-Unix hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLifecycle;

impl NoOpLifecycle {
    pub fn new() -> Self {
        Self
    }
}

impl AppLifecycle for NoOpLifecycle {
    fn subscribe(&self, _sink: EventSink<AppState>) -> Result<Subscription, SourceError> {
        Ok(Subscription::new("noop-lifecycle", || {}))
    }
}

/// Create the default lifecycle source for the current platform
#[cfg(unix)]
pub fn create_lifecycle() -> SigcontLifecycle {
    SigcontLifecycle::new()
}

/// Create the default lifecycle source for the current platform
#[cfg(not(unix))]
pub fn create_lifecycle() -> NoOpLifecycle {
    NoOpLifecycle::new()
}
