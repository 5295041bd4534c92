//! Configuration loading from TOML files.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub recalculation: RecalculationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path or ":memory:". Overridden by DATABASE_URL.
    pub url: String,
    pub max_connections: u32,
}

/// Policy knobs for the metrics recalculation trigger.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RecalculationConfig {
    /// Recompute vendor metrics when a purchase order is deleted.
    ///
    /// Off by default: deletions historically left the cached metrics at
    /// their last computed value, and existing deployments rely on that.
    pub on_delete: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Effective database URL, honoring the DATABASE_URL override.
    #[must_use]
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.database.url.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("unknown format '{other}', expected 'pretty' or 'json'"),
            }
            .into()),
        }
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            recalculation: RecalculationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "vendortrack.sqlite".into(),
            max_connections: 5,
        }
    }
}

impl Default for RecalculationConfig {
    fn default() -> Self {
        Self { on_delete: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
