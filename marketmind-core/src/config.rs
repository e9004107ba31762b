//! MarketMind configuration.
//!
//! Layered: built-in defaults, then a TOML file, then environment variables.
//! Every field has a serde default so partial files load.

use crate::data::{Interval, Period};
use crate::domain::Window;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "marketmind.toml";

pub const ENV_BASE_URL: &str = "LOOKUP_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MARKETMIND_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {message}")]
    Read { path: String, message: String },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
    #[error("invalid config value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub short_window: usize,
    pub long_window: usize,
    pub period: Period,
    pub interval: Interval,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let window = Window::default();
        Self {
            short_window: window.short,
            long_window: window.long,
            period: Period::default(),
            interval: Interval::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn window(&self) -> Window {
        Window::new(self.short_window, self.long_window)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMindConfig {
    pub lookup: LookupConfig,
    pub analysis: AnalysisConfig,
}

impl MarketMindConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the lookup client cannot use. A zero timeout would make
    /// every request fail immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "lookup.timeout_secs",
                value: self.lookup.timeout_secs.to_string(),
            });
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve the effective configuration.
    ///
    /// Uses `path` if given, else `marketmind.toml` if it exists, else
    /// defaults; then applies environment overrides from the process.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through a lookup function.
    pub fn apply_env<F>(&mut self, get: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = get(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            debug!(var = ENV_BASE_URL, "lookup base URL from environment");
            self.lookup.base_url = Some(url.trim().to_string());
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.lookup.timeout_secs = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
        }
        Ok(())
    }
}
