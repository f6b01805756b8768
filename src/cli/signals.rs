//! Shutdown signal handling for the watch loop

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::info;

/// Signals that end the watch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl ShutdownSignal {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Shutdown signal handler
///
/// Listens for SIGINT and SIGTERM and forwards them over a channel so the
/// watch loop can `select!` on them next to capture events.
pub struct ShutdownHandler {
    receiver: mpsc::Receiver<ShutdownSignal>,
}

impl ShutdownHandler {
    /// Install the handlers. Must be called inside a runtime.
    pub fn install() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            let _ = tx_int.send(ShutdownSignal::Interrupt).await;
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            let _ = tx.send(ShutdownSignal::Terminate).await;
        });

        Ok(Self { receiver: rx })
    }

    /// Wait for the next shutdown signal
    pub async fn recv(&mut self) -> Option<ShutdownSignal> {
        let signal = self.receiver.recv().await;
        if let Some(signal) = signal {
            info!(signal = signal.name(), "shutdown requested");
        }
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_names() {
        assert_eq!(ShutdownSignal::Interrupt.name(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.name(), "SIGTERM");
    }

    #[tokio::test]
    async fn installs_inside_runtime() {
        assert!(ShutdownHandler::install().is_ok());
    }
}
