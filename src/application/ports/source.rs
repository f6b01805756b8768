//! Event source port interfaces
//!
//! Both the OS notification listener and the app-lifecycle listener follow
//! the same shape: the caller hands over a sink, the source returns an owned
//! [`Subscription`] that unregisters the listener when released or dropped.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::capture::RawNotification;

/// Event source errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Failed to start listener: {0}")]
    SubscribeFailed(String),

    #[error("Listener disconnected: {0}")]
    Disconnected(String),

    #[error("Unreadable event: {0}")]
    Unreadable(String),
}

/// Callback invoked by a source for every event it delivers.
pub type EventSink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// What a notification source delivers: an event, or a failure that should
/// be reported without ending the subscription.
pub type SourceEvent = Result<RawNotification, SourceError>;

/// Host application visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Foreground,
    Background,
}

/// Handle to a registered listener.
///
/// The release action runs exactly once: on [`Subscription::release`] or on
/// drop, whichever comes first.
pub struct Subscription {
    label: &'static str,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a subscription that runs `release` when torn down
    pub fn new(label: &'static str, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            label,
            release: Some(Box::new(release)),
        }
    }

    /// Name of the listener, for diagnostics
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Unregister the listener
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("live", &self.release.is_some())
            .finish()
    }
}

/// Port for the OS-level notification listener
pub trait NotificationSource: Send + Sync {
    /// Start delivering captured notifications to `sink`.
    ///
    /// Events are delivered in the order the OS reports them. After the
    /// returned subscription is released, `sink` is not called again.
    fn subscribe(&self, sink: EventSink<SourceEvent>) -> Result<Subscription, SourceError>;
}

/// Port for host application foreground/background transitions
pub trait AppLifecycle: Send + Sync {
    /// Start delivering app state changes to `sink`.
    fn subscribe(&self, sink: EventSink<AppState>) -> Result<Subscription, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_subscription(count: &Arc<AtomicUsize>) -> Subscription {
        let count = Arc::clone(count);
        Subscription::new("test", move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn release_runs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscription = counting_subscription(&count);
        subscription.release();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let _subscription = counting_subscription(&count);
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_shows_label() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscription = counting_subscription(&count);
        assert!(format!("{:?}", subscription).contains("test"));
        assert_eq!(subscription.label(), "test");
    }
}
