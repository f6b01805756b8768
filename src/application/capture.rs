//! Capture controller - composes the permission gate, listener lifecycle and
//! notification log behind the presentation boundary

use std::num::NonZeroUsize;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::domain::capture::{
    CapturedNotification, ListenerState, NotificationLog, PermissionState, RawNotification,
};
use crate::domain::error::CaptureError;

use super::listeners::{CaptureEvent, ListenerLifecycle};
use super::permission_gate::PermissionGate;
use super::ports::{AppLifecycle, NotificationSource, OsPermission, PlatformCapability};

/// Configuration for the capture controller
#[derive(Debug, Clone, Default)]
pub struct CaptureConfig {
    /// Log retention bound; `None` keeps everything
    pub max_entries: Option<NonZeroUsize>,
}

/// What handling one event changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureUpdate {
    /// A notification was added to the log
    Captured(CapturedNotification),
    /// Permission was re-evaluated
    Permission {
        previous: PermissionState,
        current: PermissionState,
    },
    /// A recoverable failure was recorded in `last_error`
    Failed(CaptureError),
}

/// Consistent view of everything the presentation layer reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSnapshot {
    pub permission: PermissionState,
    pub listener: ListenerState,
    pub notifications: Vec<CapturedNotification>,
    pub last_error: Option<String>,
    pub revision: u64,
}

/// Notification capture controller.
///
/// All state is owned here and mutated through `&mut self`, so events are
/// handled one at a time in delivery order. Sources push into an internal
/// channel; the owner drives the loop with [`next_event`](Self::next_event)
/// and [`handle_event`](Self::handle_event).
pub struct CaptureController<C, P, S, L>
where
    C: PlatformCapability,
    P: OsPermission,
    S: NotificationSource,
    L: AppLifecycle,
{
    gate: PermissionGate<C, P>,
    listeners: ListenerLifecycle<S, L>,
    log: NotificationLog,
    permission: PermissionState,
    last_error: Option<CaptureError>,
    events: mpsc::UnboundedReceiver<CaptureEvent>,
    changes: watch::Sender<u64>,
}

impl<C, P, S, L> CaptureController<C, P, S, L>
where
    C: PlatformCapability,
    P: OsPermission,
    S: NotificationSource,
    L: AppLifecycle,
{
    /// Create a new, inactive controller
    pub fn new(platform: C, permission: P, source: S, lifecycle: L, config: CaptureConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let log = match config.max_entries {
            Some(max) => NotificationLog::with_capacity_limit(max),
            None => NotificationLog::new(),
        };
        let (changes, _) = watch::channel(0);

        Self {
            gate: PermissionGate::new(platform, permission),
            listeners: ListenerLifecycle::new(source, lifecycle, tx),
            log,
            permission: PermissionState::Unknown,
            last_error: None,
            events: rx,
            changes,
        }
    }

    /// Last evaluated permission state. Does not query the OS.
    pub fn permission_state(&self) -> PermissionState {
        self.permission
    }

    /// Captured notifications, newest first
    pub fn snapshot(&self) -> Vec<CapturedNotification> {
        self.log.snapshot()
    }

    /// Read-only view of the log
    pub fn log(&self) -> &NotificationLog {
        &self.log
    }

    /// Diagnostic for the most recent recoverable failure
    pub fn last_error(&self) -> Option<String> {
        self.last_error.as_ref().map(ToString::to_string)
    }

    /// The most recent recoverable failure
    pub fn last_failure(&self) -> Option<&CaptureError> {
        self.last_error.as_ref()
    }

    pub fn listener_state(&self) -> ListenerState {
        self.listeners.state()
    }

    /// Number of live listener subscriptions
    pub fn live_subscriptions(&self) -> usize {
        self.listeners.live_subscriptions()
    }

    /// Permission, listener state, log and error captured together
    pub fn capture_snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            permission: self.permission,
            listener: self.listeners.state(),
            notifications: self.log.snapshot(),
            last_error: self.last_error(),
            revision: *self.changes.borrow(),
        }
    }

    /// Revision counter, bumped on every observable change
    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Request permission and attach the listeners.
    ///
    /// A no-op on unsupported platforms and while already activated. When
    /// permission is not granted, only the foreground listener is attached
    /// so the next foreground regain can re-check.
    pub async fn activate(&mut self) -> PermissionState {
        if !self.gate.is_platform_supported() {
            self.permission = PermissionState::Unsupported;
            self.last_error = None;
            info!("notification capture unsupported on this platform");
            self.bump();
            return self.permission;
        }

        if let Err(e) = self.listeners.begin_activation() {
            debug!(error = %e, "activate ignored");
            return self.permission;
        }

        let granted = match self.gate.request_and_evaluate().await {
            Ok(state) => {
                self.permission = state;
                self.last_error = CaptureError::for_permission(state);
                state.is_granted()
            }
            Err(e) => {
                warn!(error = %e, "permission request failed");
                self.permission = PermissionState::Unknown;
                self.last_error = Some(CaptureError::OsPrimitiveFailure(e.to_string()));
                false
            }
        };

        if granted {
            self.attach_notifications();
        } else {
            self.listeners.detach_notifications();
        }

        if let Err(e) = self.listeners.attach_foreground() {
            warn!(error = %e, "foreground listener unavailable");
            self.last_error = Some(CaptureError::OsPrimitiveFailure(e.to_string()));
        }

        info!(
            permission = %self.permission,
            listener = %self.listeners.state(),
            "capture activated"
        );
        self.bump();
        self.permission
    }

    /// Release both listeners. Idempotent.
    ///
    /// Notifications the source delivered before release are still
    /// ingested, so nothing observed is lost.
    pub fn deactivate(&mut self) {
        if !self.listeners.release_all() {
            return;
        }

        while let Ok(event) = self.events.try_recv() {
            if let CaptureEvent::Notification(raw) = event {
                self.log.ingest(raw);
            }
        }

        info!(captured = self.log.len(), "capture deactivated");
        self.bump();
    }

    /// Re-check permission without prompting and reconcile the listeners
    pub async fn refresh(&mut self) -> CaptureUpdate {
        let previous = self.permission;

        match self.gate.evaluate().await {
            Ok(current) => {
                self.apply_permission(current);
                self.bump();
                CaptureUpdate::Permission { previous, current }
            }
            Err(e) => {
                warn!(error = %e, "permission check failed");
                let failure = CaptureError::OsPrimitiveFailure(e.to_string());
                self.last_error = Some(failure.clone());
                self.bump();
                CaptureUpdate::Failed(failure)
            }
        }
    }

    /// Wait for the next event from the listeners. Cancel-safe.
    pub async fn next_event(&mut self) -> Option<CaptureEvent> {
        self.events.recv().await
    }

    /// Handle one event to completion
    pub async fn handle_event(&mut self, event: CaptureEvent) -> CaptureUpdate {
        match event {
            CaptureEvent::Notification(raw) => CaptureUpdate::Captured(self.ingest(raw)),
            CaptureEvent::SourceFailed(e) => {
                warn!(error = %e, "notification listener reported a failure");
                let failure = CaptureError::OsPrimitiveFailure(e.to_string());
                self.last_error = Some(failure.clone());
                self.bump();
                CaptureUpdate::Failed(failure)
            }
            CaptureEvent::ForegroundRegained => {
                debug!("foreground regained, re-evaluating permission");
                self.refresh().await
            }
        }
    }

    /// Handle every event already queued, without waiting for more
    pub async fn process_pending(&mut self) -> Vec<CaptureUpdate> {
        let mut updates = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            updates.push(self.handle_event(event).await);
        }
        updates
    }

    fn ingest(&mut self, raw: RawNotification) -> CapturedNotification {
        let entry = self.log.ingest(raw);
        debug!(id = %entry.id(), source = ?entry.source(), "notification captured");
        self.bump();
        entry
    }

    fn apply_permission(&mut self, state: PermissionState) {
        if state != self.permission {
            info!(from = %self.permission, to = %state, "permission changed");
        }
        self.permission = state;
        self.last_error = CaptureError::for_permission(state);

        if !self.listeners.is_engaged() {
            return;
        }

        if state.is_granted() {
            self.attach_notifications();
        } else if self.listeners.has_notification_listener() {
            self.listeners.detach_notifications();
        }
    }

    fn attach_notifications(&mut self) {
        if let Err(e) = self.listeners.attach_notifications() {
            warn!(error = %e, "notification listener unavailable");
            self.last_error = Some(CaptureError::OsPrimitiveFailure(e.to_string()));
            self.listeners.detach_notifications();
        }
    }

    fn bump(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }
}
