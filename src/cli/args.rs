//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// notif-capture - capture desktop notifications posted by other applications
#[derive(Parser, Debug)]
#[command(name = "notif-capture")]
#[command(version)]
#[command(about = "Capture desktop notifications posted by other applications")]
#[command(long_about = None)]
pub struct Cli {
    /// Keep at most N notifications in the log
    #[arg(long, value_name = "N", global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_entries: Option<u64>,

    /// Do not print the originating application
    #[arg(long, global = true)]
    pub no_source: bool,

    /// Show debug logs on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Command to run (defaults to watch)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture notifications until interrupted
    Watch,
    /// Show notification access without prompting
    Status,
    /// Feed recorded notifications (JSON lines) through the capture pipeline
    Replay {
        /// File with one JSON notification per line
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Send a test desktop notification
    Probe {
        /// Notification title
        #[arg(long, default_value = "notif-capture")]
        title: String,
        /// Notification body
        #[arg(long, default_value = "Probe notification")]
        body: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "max_entries",
    "show_source",
    "time_format",
    "linux.monitor_command",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["notif-capture"]);
        assert!(cli.max_entries.is_none());
        assert!(!cli.no_source);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_watch_with_flags() {
        let cli = Cli::parse_from(["notif-capture", "watch", "--max-entries", "20", "--no-source", "-v"]);
        assert!(matches!(cli.command, Some(Commands::Watch)));
        assert_eq!(cli.max_entries, Some(20));
        assert!(cli.no_source);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_rejects_zero_max_entries() {
        let result = Cli::try_parse_from(["notif-capture", "--max-entries", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_replay() {
        let cli = Cli::parse_from(["notif-capture", "replay", "events.jsonl"]);
        if let Some(Commands::Replay { file }) = cli.command {
            assert_eq!(file, PathBuf::from("events.jsonl"));
        } else {
            panic!("Expected Replay command");
        }
    }

    #[test]
    fn cli_replay_requires_file() {
        assert!(Cli::try_parse_from(["notif-capture", "replay"]).is_err());
    }

    #[test]
    fn cli_parses_probe_defaults() {
        let cli = Cli::parse_from(["notif-capture", "probe"]);
        if let Some(Commands::Probe { title, body }) = cli.command {
            assert_eq!(title, "notif-capture");
            assert_eq!(body, "Probe notification");
        } else {
            panic!("Expected Probe command");
        }
    }

    #[test]
    fn cli_parses_probe_custom() {
        let cli = Cli::parse_from(["notif-capture", "probe", "--title", "Hi", "--body", "There"]);
        if let Some(Commands::Probe { title, body }) = cli.command {
            assert_eq!(title, "Hi");
            assert_eq!(body, "There");
        } else {
            panic!("Expected Probe command");
        }
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["notif-capture", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["notif-capture", "config", "set", "max_entries", "50"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "max_entries");
            assert_eq!(value, "50");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("max_entries"));
        assert!(is_valid_config_key("time_format"));
        assert!(is_valid_config_key("linux.monitor_command"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
