//! Listener lifecycle - owns the notification and foreground subscriptions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::domain::capture::{InvalidStateTransition, ListenerSession, ListenerState, RawNotification};

use super::ports::{
    AppLifecycle, AppState, EventSink, NotificationSource, SourceError, SourceEvent, Subscription,
};

/// Events forwarded from the subscriptions to the controller's loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A notification observed by the OS listener
    Notification(RawNotification),
    /// The OS listener reported a failure but keeps running
    SourceFailed(SourceError),
    /// The host app moved from background to foreground
    ForegroundRegained,
}

/// Owns at most one live subscription per event source.
///
/// Callers never hold a [`Subscription`]; they ask this type to attach or
/// release, which makes a second concurrent subscription impossible.
/// Dropping it releases whatever is still held.
pub struct ListenerLifecycle<S, L>
where
    S: NotificationSource,
    L: AppLifecycle,
{
    source: S,
    lifecycle: L,
    session: ListenerSession,
    notifications: Option<Subscription>,
    foreground: Option<Subscription>,
    events: mpsc::UnboundedSender<CaptureEvent>,
}

impl<S, L> ListenerLifecycle<S, L>
where
    S: NotificationSource,
    L: AppLifecycle,
{
    /// Create a lifecycle that forwards events into `events`
    pub fn new(source: S, lifecycle: L, events: mpsc::UnboundedSender<CaptureEvent>) -> Self {
        Self {
            source,
            lifecycle,
            session: ListenerSession::new(),
            notifications: None,
            foreground: None,
            events,
        }
    }

    pub fn state(&self) -> ListenerState {
        self.session.state()
    }

    /// Activated, with or without the notification listener
    pub fn is_engaged(&self) -> bool {
        self.session.is_engaged()
    }

    pub fn has_notification_listener(&self) -> bool {
        self.notifications.is_some()
    }

    pub fn has_foreground_listener(&self) -> bool {
        self.foreground.is_some()
    }

    /// Number of subscriptions currently held
    pub fn live_subscriptions(&self) -> usize {
        usize::from(self.notifications.is_some()) + usize::from(self.foreground.is_some())
    }

    pub fn begin_activation(&mut self) -> Result<(), InvalidStateTransition> {
        self.session.begin_activation()
    }

    /// Subscribe to the OS notification source unless already subscribed
    pub fn attach_notifications(&mut self) -> Result<(), SourceError> {
        if self.notifications.is_some() {
            return Ok(());
        }

        let events = self.events.clone();
        let sink: EventSink<SourceEvent> = Arc::new(move |event| {
            let event = match event {
                Ok(raw) => CaptureEvent::Notification(raw),
                Err(err) => CaptureEvent::SourceFailed(err),
            };
            // The controller is gone once the receiver is dropped
            let _ = events.send(event);
        });

        let subscription = self.source.subscribe(sink)?;
        info!(listener = subscription.label(), "notification listener attached");
        self.notifications = Some(subscription);

        if let Err(e) = self.session.attach() {
            debug!(error = %e, "listener session already attached");
        }
        Ok(())
    }

    /// Subscribe to foreground transitions unless already subscribed.
    ///
    /// Only background-to-foreground transitions reach the controller; the
    /// app is assumed to be in the foreground while activating.
    pub fn attach_foreground(&mut self) -> Result<(), SourceError> {
        if self.foreground.is_some() {
            return Ok(());
        }

        let events = self.events.clone();
        let was_foreground = AtomicBool::new(true);
        let sink: EventSink<AppState> = Arc::new(move |state| {
            let foreground = state == AppState::Foreground;
            let previous = was_foreground.swap(foreground, Ordering::SeqCst);
            if foreground && !previous {
                let _ = events.send(CaptureEvent::ForegroundRegained);
            }
        });

        let subscription = self.lifecycle.subscribe(sink)?;
        info!(listener = subscription.label(), "foreground listener attached");
        self.foreground = Some(subscription);
        Ok(())
    }

    /// Release the notification subscription, keeping the foreground one
    pub fn detach_notifications(&mut self) {
        if let Some(subscription) = self.notifications.take() {
            info!(listener = subscription.label(), "notification listener released");
            subscription.release();
        }
        if let Err(e) = self.session.detach() {
            debug!(error = %e, "listener session already detached");
        }
    }

    /// Release both subscriptions if held. Safe to call repeatedly.
    ///
    /// Returns whether anything was released or the session was engaged.
    pub fn release_all(&mut self) -> bool {
        let was_inactive = self.session.is_inactive();

        for subscription in [self.notifications.take(), self.foreground.take()]
            .into_iter()
            .flatten()
        {
            info!(listener = subscription.label(), "listener released");
            subscription.release();
        }
        self.session.deactivate();

        !was_inactive
    }
}
