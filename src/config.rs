//! Configuration management for Evsched
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files with support for environment variable overrides.
//! Every section is optional in the file; missing keys fall back to defaults.

use crate::error::{EvschedError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod defaults;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "EVSCHED_CONFIG";
/// Environment variable overriding `api.base_url`
pub const BASE_URL_ENV: &str = "EVSCHED_API_BASE_URL";
/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "EVSCHED_LOG_LEVEL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// EV.Energy API connection settings
    pub api: ApiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Rendering of the JSON report
    pub output: OutputConfig,
}

/// EV.Energy API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the API, without the `/api/v1` path
    pub base_url: String,

    /// Request timeout in seconds; unset keeps the HTTP client's default
    pub timeout_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional console-specific level (defaults to `level`)
    pub console_level: Option<String>,

    /// Optional file-specific level (defaults to `level`)
    pub file_level: Option<String>,

    /// Path to log file
    pub file: String,

    /// File rotation (never, hourly, daily)
    pub rotation: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to also log to stderr
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

/// Report rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Timezone for the `parsed` field: `local` or an IANA name
    pub timezone: String,

    /// strftime format of the `parsed` field
    pub parsed_format: String,

    /// Indent the JSON report
    pub pretty: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the first location found, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::from_default_locations()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_default_locations() -> Result<Self> {
        let default_paths = ["evsched.yaml", "/etc/evsched/config.yaml"];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.logging.level = level.trim().to_string();
        }
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(EvschedError::validation(
                "api.base_url",
                "Base URL cannot be empty",
            ));
        }
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(EvschedError::validation(
                "api.base_url",
                "Base URL must start with http:// or https://",
            ));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(EvschedError::validation(
                "api.timeout_secs",
                "Must be greater than 0",
            ));
        }

        crate::logging::parse_log_level(&self.logging.level)
            .map_err(|e| EvschedError::validation("logging.level", e.to_string()))?;
        for (field, level) in [
            ("logging.console_level", &self.logging.console_level),
            ("logging.file_level", &self.logging.file_level),
        ] {
            if let Some(level) = level {
                crate::logging::parse_log_level(level)
                    .map_err(|e| EvschedError::validation(field, e.to_string()))?;
            }
        }

        if !matches!(
            self.logging.rotation.to_lowercase().as_str(),
            "never" | "hourly" | "daily"
        ) {
            return Err(EvschedError::validation(
                "logging.rotation",
                "Must be one of never, hourly, daily",
            ));
        }

        if self.logging.file.trim().is_empty() {
            return Err(EvschedError::validation(
                "logging.file",
                "Log file path cannot be empty",
            ));
        }

        crate::report::resolve_timezone(&self.output.timezone)?;
        crate::report::validate_format(&self.output.parsed_format)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://app.ev.energy");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.logging.level, "WARN");
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("output:\n  timezone: Europe/London\n").unwrap();
        assert_eq!(config.output.timezone, "Europe/London");
        assert_eq!(config.output.parsed_format, "%H:%M:%S %d%b");
        assert_eq!(config.api.base_url, "https://app.ev.energy");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (BASE_URL_ENV, " http://127.0.0.1:9000 "),
            (LOG_LEVEL_ENV, "debug"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.logging.level, "debug");

        // Blank values are ignored
        let mut config = Config::default();
        config.apply_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.api.base_url, "https://app.ev.energy");
    }
}
