//! Foreground detection for terminal sessions via SIGCONT

use nix::sys::signal::Signal;
use tokio::runtime::Handle;
use tokio::signal::unix::{signal, SignalKind};
use tracing::debug;

use crate::application::ports::{AppLifecycle, AppState, EventSink, SourceError, Subscription};

/// Treats job-control resumption as a foreground regain.
///
/// A process receiving SIGCONT was stopped (Ctrl+Z, `kill -STOP`) and has
/// just been resumed, so each SIGCONT is reported as a background state
/// followed by a foreground state.
#[derive(Debug, Default, Clone, Copy)]
pub struct SigcontLifecycle;

impl SigcontLifecycle {
    pub fn new() -> Self {
        Self
    }
}

impl AppLifecycle for SigcontLifecycle {
    fn subscribe(&self, sink: EventSink<AppState>) -> Result<Subscription, SourceError> {
        let runtime = Handle::try_current().map_err(|e| SourceError::SubscribeFailed(e.to_string()))?;

        // Registering needs the runtime context
        let _guard = runtime.enter();
        let mut sigcont = signal(SignalKind::from_raw(Signal::SIGCONT as i32))
            .map_err(|e| SourceError::SubscribeFailed(format!("SIGCONT handler: {}", e)))?;

        let task = runtime.spawn(async move {
            while sigcont.recv().await.is_some() {
                debug!("received SIGCONT");
                sink(AppState::Background);
                sink(AppState::Foreground);
            }
        });

        Ok(Subscription::new("sigcont", move || task.abort()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn subscribe_outside_runtime_fails() {
        let result = SigcontLifecycle::new().subscribe(Arc::new(|_| {}));
        assert!(matches!(result, Err(SourceError::SubscribeFailed(_))));
    }

    #[tokio::test]
    async fn subscribe_inside_runtime_succeeds() {
        let subscription = SigcontLifecycle::new().subscribe(Arc::new(|_| {})).unwrap();
        assert_eq!(subscription.label(), "sigcont");
        subscription.release();
    }
}
