//! Production configuration system
//!
//! Provides centralized configuration management with:
//! - Environment variable support
//! - Config file loading (optional)
//! - Runtime defaults
//! - Validation and type safety

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Webex API configuration
    pub api: ApiConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for all API requests, without a trailing slash.
    pub base_url: String,
    /// Lookback for hourly aggregation, one hour under the API's 48 h cap.
    pub hourly_max_hours: i64,
    /// Lookback for daily aggregation, one day under the API's 30 d cap.
    pub daily_max_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub output_directory: PathBuf,
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            api: ApiConfig {
                base_url: "https://webexapis.com/v1".to_string(),
                hourly_max_hours: 47,
                daily_max_days: 29,
            },
            paths: PathsConfig {
                output_directory: PathBuf::from("."),
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // Try to load from config file if it exists
        let config_paths = [
            PathBuf::from("workspace-metrics.toml"),
            PathBuf::from(".workspace-metrics.toml"),
            dirs::config_dir()
                .map(|d| d.join("workspace-metrics").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        // Override with environment variables
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // Logging overrides
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        // API overrides
        if let Ok(val) = env::var("WORKSPACE_METRICS_BASE_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = env::var("WORKSPACE_METRICS_HOURLY_MAX_HOURS") {
            self.api.hourly_max_hours = val
                .parse()
                .context("Invalid WORKSPACE_METRICS_HOURLY_MAX_HOURS")?;
        }
        if let Ok(val) = env::var("WORKSPACE_METRICS_DAILY_MAX_DAYS") {
            self.api.daily_max_days = val
                .parse()
                .context("Invalid WORKSPACE_METRICS_DAILY_MAX_DAYS")?;
        }

        // Path overrides
        if let Ok(val) = env::var("WORKSPACE_METRICS_OUTPUT_DIR") {
            self.paths.output_directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("WORKSPACE_METRICS_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&mut self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("API base URL must not be empty"));
        }

        // Request paths always begin with '/', so strip any trailing slash
        while self.api.base_url.ends_with('/') {
            self.api.base_url.pop();
        }

        if self.api.hourly_max_hours < 1 {
            return Err(anyhow::anyhow!(
                "Hourly lookback must be at least 1 hour, got {}",
                self.api.hourly_max_hours
            ));
        }

        if self.api.daily_max_days < 1 {
            return Err(anyhow::anyhow!(
                "Daily lookback must be at least 1 day, got {}",
                self.api.daily_max_days
            ));
        }

        // The log directory is only needed when a file sink is configured
        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().expect("Failed to load configuration"))
}
