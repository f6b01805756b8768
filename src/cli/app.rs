//! Command runners for the capture CLI

use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use crate::application::ports::{ConfigStore, Notifier};
use crate::application::{CaptureConfig, CaptureController, CaptureUpdate, PermissionGate};
use crate::domain::capture::PermissionState;
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    create_lifecycle, create_notifier, DbusMonitorPermission, DbusMonitorSource, DesktopPlatform,
    NoOpLifecycle, ReplaySource, StaticPermission, StaticPlatform,
};

use super::presenter::{permission_guidance, DisplayOptions, Presenter};
use super::signals::ShutdownHandler;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Capture notifications until SIGINT/SIGTERM
pub async fn run_watch(config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::with_display(display_options(config));

    let mut shutdown = match ShutdownHandler::install() {
        Ok(handler) => handler,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let command = config.monitor_command_or_default();
    let mut controller = CaptureController::new(
        DesktopPlatform::detect(),
        DbusMonitorPermission::new(command),
        DbusMonitorSource::new(command),
        create_lifecycle(),
        capture_config(config),
    );

    presenter.start_spinner("Requesting notification access...");
    let permission = controller.activate().await;

    match permission {
        PermissionState::Granted => presenter.spinner_success("Notification access granted"),
        _ => {
            presenter.stop_spinner();
            presenter.permission_status(permission);
            presenter.listener_status(controller.listener_state());
        }
    }

    if let Some(error) = controller.last_failure() {
        presenter.failure(error);
    }
    if let Some(hint) = permission_guidance(permission) {
        presenter.info(hint);
    }

    if matches!(
        permission,
        PermissionState::Unsupported | PermissionState::UnsupportedDevice
    ) {
        return ExitCode::from(EXIT_ERROR);
    }

    if permission.is_granted() {
        presenter.info("Listening for notifications (Ctrl+C to stop)");
    } else {
        presenter.info("Waiting for access; resume this process (fg or kill -CONT) to re-check");
    }

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            Some(event) = controller.next_event() => {
                let update = controller.handle_event(event).await;
                report_update(&presenter, &update);
            }
            else => break,
        }
    }

    for update in controller.process_pending().await {
        report_update(&presenter, &update);
    }
    controller.deactivate();

    presenter.success(&format!(
        "Stopped; captured {} notification(s)",
        controller.log().len()
    ));
    ExitCode::from(EXIT_SUCCESS)
}

/// Print the current permission state without prompting
pub async fn run_status(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let gate = PermissionGate::new(
        DesktopPlatform::detect(),
        DbusMonitorPermission::new(config.monitor_command_or_default()),
    );

    match gate.evaluate().await {
        Ok(state) => {
            presenter.permission_status(state);
            if let Some(hint) = permission_guidance(state) {
                presenter.info(hint);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Feed a JSON-lines file through the controller and print the log
pub async fn run_replay(config: &AppConfig, file: &Path) -> ExitCode {
    let presenter = Presenter::with_display(display_options(config));

    let source = match ReplaySource::from_path(file).await {
        Ok(source) => source,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut controller = CaptureController::new(
        StaticPlatform::capable(),
        StaticPermission::granted(),
        source,
        NoOpLifecycle::new(),
        capture_config(config),
    );

    controller.activate().await;

    let mut unreadable = 0;
    for update in controller.process_pending().await {
        if let CaptureUpdate::Failed(e) = update {
            presenter.failure(&e);
            unreadable += 1;
        }
    }
    controller.deactivate();

    let snapshot = controller.snapshot();
    for entry in &snapshot {
        presenter.notification(entry);
    }

    debug!(kept = snapshot.len(), unreadable, "replay finished");
    presenter.info(&format!(
        "Replayed {} notification(s), {} unreadable line(s)",
        snapshot.len(),
        unreadable
    ));
    ExitCode::from(EXIT_SUCCESS)
}

/// Send a desktop notification for the watch loop to pick up
pub async fn run_probe(title: &str, body: &str) -> ExitCode {
    let presenter = Presenter::new();
    let notifier = create_notifier();

    match notifier.notify(title, body).await {
        Ok(()) => {
            presenter.success("Probe notification sent");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load_or_empty().await;

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

fn report_update(presenter: &Presenter, update: &CaptureUpdate) {
    match update {
        CaptureUpdate::Captured(entry) => presenter.notification(entry),
        CaptureUpdate::Permission { previous, current } if previous != current => {
            presenter.permission_status(*current);
            if let Some(hint) = permission_guidance(*current) {
                presenter.info(hint);
            }
        }
        CaptureUpdate::Permission { .. } => {}
        CaptureUpdate::Failed(e) => presenter.failure(e),
    }
}

fn display_options(config: &AppConfig) -> DisplayOptions {
    DisplayOptions {
        time_format: config.time_format_or_default().to_string(),
        show_source: config.show_source_or_default(),
    }
}

fn capture_config(config: &AppConfig) -> CaptureConfig {
    CaptureConfig {
        max_entries: Some(config.max_entries_or_default()),
    }
}
