//! Console configuration.
//!
//! A small JSON file read once at startup. The file lives in the standard
//! configuration directory (`~/.config/driverconnect/config.json` on most
//! platforms) unless `DRIVERCONNECT_CONFIG` points elsewhere. A missing file
//! yields defaults; a malformed one is reported and then ignored.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "DRIVERCONNECT_CONFIG";
/// Environment variable overriding [`ConsoleConfig::seed_path`].
pub const SEED_PATH_ENV: &str = "DRIVERCONNECT_SEED";
/// Environment variable overriding [`ConsoleConfig::page_step`].
pub const PAGE_STEP_ENV: &str = "DRIVERCONNECT_PAGE_STEP";

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Error surfaced when reading the configuration fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// JSON seed for the in-memory document store.
    pub seed_path: Option<PathBuf>,
    /// How many more notifications "View More" reveals.
    pub page_step: usize,
    pub toast_ttl_ms: u64,
    /// Start with the menu panel minimized.
    pub minimized: bool,
    pub alert_sound: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            page_step: 10,
            toast_ttl_ms: 4000,
            minimized: false,
            alert_sound: true,
        }
    }
}

impl ConsoleConfig {
    /// Loads the config from its default location and applies environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_path();
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads the config at `path` without consulting the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<ConsoleConfig>(&data) {
                Ok(config) => Ok(config.normalized()),
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse config file; using defaults"
                    );
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::Io(error)),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(seed) = env::var(SEED_PATH_ENV)
            && !seed.trim().is_empty()
        {
            self.seed_path = Some(expand_tilde(&seed));
        }
        if let Ok(step) = env::var(PAGE_STEP_ENV) {
            match step.trim().parse::<usize>() {
                Ok(step) => self.page_step = step,
                Err(error) => warn!(value = %step, error = %error, "Ignoring invalid page step override"),
            }
        }
        *self = std::mem::take(self).normalized();
    }

    fn normalized(mut self) -> Self {
        if self.page_step == 0 {
            self.page_step = Self::default().page_step;
        }
        self.seed_path = self.seed_path.map(|path| expand_tilde(&path.to_string_lossy()));
        self
    }
}

fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("driverconnect")
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ConsoleConfig::load_from(&dir.path().join("absent.json")).expect("load");
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").expect("write");
        assert_eq!(ConsoleConfig::load_from(&path).expect("load"), ConsoleConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "pageStep": 0, "minimized": true }"#).expect("write");
        let config = ConsoleConfig::load_from(&path).expect("load");
        assert!(config.minimized);
        assert_eq!(config.page_step, 10);
        assert_eq!(config.toast_ttl_ms, 4000);
    }

    #[test]
    fn environment_overrides_file_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        ConsoleConfig {
            page_step: 5,
            ..ConsoleConfig::default()
        }
        .save_to(&path)
        .expect("save");

        temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, Some(path.to_string_lossy().to_string())),
                (PAGE_STEP_ENV, Some("25".to_string())),
                (SEED_PATH_ENV, Some("/tmp/seed.json".to_string())),
            ],
            || {
                let config = ConsoleConfig::load().expect("load");
                assert_eq!(config.page_step, 25);
                assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
            },
        );
    }
}
