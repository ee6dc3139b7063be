//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `thinghub.toml` in the working directory (or the path in
//! `THINGHUB_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;
use thinghub_domain::error::ThingHubError;
use thinghub_domain::settings::Settings;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_PATH: &str = "thinghub.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Platforms, connections and things to bootstrap.
    #[serde(flatten)]
    pub settings: Settings,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `THINGHUB_CONFIG` or `thinghub.toml` (if
    /// present) then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("THINGHUB_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("THINGHUB_PLATFORMS") {
            self.settings.platforms = parse_platform_list(&val);
        }
        if let Ok(val) = std::env::var("THINGHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging filter must not be empty".to_string(),
            ));
        }
        self.settings.validate().map_err(ConfigError::Settings)
    }
}

/// Split a comma-separated platform list, dropping blanks.
fn parse_platform_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "thinghubd=info,thinghub_app=info,thinghub_adapter_demo=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A connection or thing entry is malformed.
    #[error("invalid settings")]
    Settings(#[source] ThingHubError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
