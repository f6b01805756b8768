//! Config file under the user's XDG config directory
//!
//! The file lives at `$XDG_CONFIG_HOME/notif-capture/config.toml`, falling
//! back to `$HOME/.config` when no XDG directory is reported.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Directory name under the XDG config home
pub const APP_DIR: &str = "notif-capture";

const FILE_NAME: &str = "config.toml";

/// TOML config store at a fixed path
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Store at the user's config location
    pub fn locate() -> Result<Self, ConfigError> {
        let path = resolve_path(dirs::config_dir(), dirs::home_dir())?;
        debug!(path = %path.display(), "config location");
        Ok(Self { path })
    }

    /// Store at an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(&self, content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: self.path.clone(),
            message: e.to_string().trim_end().to_string(),
        })
    }

    fn to_toml(&self, config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| self.write_error(e))
    }

    fn write_error(&self, e: impl std::fmt::Display) -> ConfigError {
        ConfigError::WriteError {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    /// Sibling file the new contents are written to before the rename
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Config file path from the XDG config dir, else `$HOME/.config`
fn resolve_path(config_dir: Option<PathBuf>, home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let base = config_dir
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.filter(|h| h.is_absolute()).map(|h| h.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR).join(FILE_NAME))
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::empty()),
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
        };

        self.parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let content = self.to_toml(config)?;

        // Rename over the old file so readers never see a partial write
        let staging = self.staging_path();
        fs::write(&staging, content)
            .await
            .map_err(|e| self.write_error(e))?;
        if let Err(e) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(self.write_error(e));
        }

        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.path.clone()));
        }

        self.save(&AppConfig::defaults()).await
    }
}
