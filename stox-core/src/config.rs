//! Stox configuration, loaded from TOML.
//!
//! Every field has a default, so an empty or missing file is valid. The API
//! key may also come from the `STOX_API_KEY` environment variable, which wins
//! over the file.

use crate::aggregate::{AggregateOptions, DEFAULT_WEEK_DAYS};
use crate::data::{AlphaVantageProvider, DataError, DEFAULT_BASE_URL};
use crate::domain::{Interval, OutputSize};
use crate::store::{FavoritesStore, Preferences};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_ENV: &str = "STOX_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no Alpha Vantage API key: set provider.api_key or $STOX_API_KEY")]
    MissingApiKey,

    #[error("no preferences path configured and no platform config directory found")]
    NoPreferencesPath,

    #[error(transparent)]
    Provider(#[from] DataError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoxConfig {
    pub provider: ProviderConfig,
    pub chart: ChartConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
    pub output_size: OutputSize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 3000,
            output_size: OutputSize::Full,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub interval: Interval,
    pub week_window_days: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            interval: Interval::OneMin,
            week_window_days: DEFAULT_WEEK_DAYS as u32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub preferences_path: Option<PathBuf>,
}

impl StoxConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` if given (it must exist), else the default location if it
    /// exists, else defaults. Applies the environment API key afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Replace the API key with `key` when it is non-blank.
    pub fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.provider.api_key = Some(key);
        }
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions::with_week_days(self.chart.week_window_days)
    }

    pub fn preferences_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.preferences_path {
            Some(p) => Ok(p.clone()),
            None => dirs::config_dir()
                .map(|d| d.join("stox").join("preferences.json"))
                .ok_or(ConfigError::NoPreferencesPath),
        }
    }

    pub fn favorites_store(&self) -> Result<FavoritesStore, ConfigError> {
        Ok(FavoritesStore::new(Preferences::new(self.preferences_path()?)))
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn build_provider(&self) -> Result<AlphaVantageProvider, ConfigError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(AlphaVantageProvider::new(
            api_key,
            self.base_url.clone(),
            self.timeout(),
            self.output_size,
        )?)
    }
}

/// `<config_dir>/stox/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stox").join("config.toml"))
}
