//! Configuration value objects

pub mod app_config;

pub use app_config::{
    is_valid_time_format, AppConfig, LinuxConfig, DEFAULT_MAX_ENTRIES, DEFAULT_MONITOR_COMMAND,
    DEFAULT_TIME_FORMAT,
};
