//! notif-capture CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use notif_capture::application::ports::ConfigStore;
use notif_capture::cli::{
    app::{load_merged_config, run_probe, run_replay, run_status, run_watch, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use notif_capture::domain::config::{is_valid_time_format, AppConfig};
use notif_capture::infrastructure::XdgConfigStore;

/// Environment variable holding the log filter
const LOG_ENV: &str = "NOTIF_CAPTURE_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let presenter = Presenter::new();
    let store = match XdgConfigStore::locate() {
        Ok(store) => store,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let command = match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Probe { title, body }) => return run_probe(&title, &body).await,
        other => other.unwrap_or(Commands::Watch),
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        max_entries: cli.max_entries.and_then(|n| usize::try_from(n).ok()),
        show_source: if cli.no_source { Some(false) } else { None },
        ..Default::default()
    };
    let config = load_merged_config(&store, cli_config).await;

    if let Some(format) = config.time_format.as_deref() {
        if !is_valid_time_format(format) {
            presenter.error(&format!(
                "Invalid time_format '{}' in {}",
                format,
                store.path().display()
            ));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    match command {
        Commands::Watch => run_watch(&config).await,
        Commands::Status => run_status(&config).await,
        Commands::Replay { file } => run_replay(&config, &file).await,
        Commands::Probe { .. } | Commands::Config { .. } => ExitCode::SUCCESS,
    }
}
