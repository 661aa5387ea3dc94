//! Configuration loading and typed config structures for the estimator.
//!
//! The canonical configuration lives in `biochar-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.

use std::path::Path;

use serde::Deserialize;

use crate::response::ResponseShape;

/// Environment variable overriding `server.host`.
pub const ENV_HOST: &str = "BIOCHAR_HOST";
/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "BIOCHAR_PORT";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "BIOCHAR_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level estimator configuration.
///
/// Mirrors the structure of `biochar-config.yaml`. Every field has a
/// default, so an empty document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EstimatorConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Response contract settings.
    #[serde(default)]
    pub response: ResponseConfig,
}

impl EstimatorConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `BIOCHAR_HOST` overrides `server.host`
    /// - `BIOCHAR_PORT` overrides `server.port`
    /// - `BIOCHAR_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    ///
    /// Environment overrides are applied in both cases.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides(|var| std::env::var(var).ok())?;
            Ok(config)
        }
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup (normally the process env).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_HOST) {
            self.server.host = val;
        }
        if let Some(val) = lookup(ENV_PORT) {
            self.server.port = val.parse().map_err(|e| ConfigError::InvalidEnv {
                var: ENV_PORT,
                value: format!("{val} ({e})"),
            })?;
        }
        if let Some(val) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = val;
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in bytes (image uploads).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Response contract configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseConfig {
    /// Minimal (three figures) or extended (full breakdown) responses.
    #[serde(default)]
    pub shape: ResponseShape,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8000
}

const fn default_max_upload_bytes() -> usize {
    10_485_760
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_config_is_valid() {
        let config = EstimatorConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_upload_bytes, 10_485_760);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.response.shape, ResponseShape::Extended);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9090
  max_upload_bytes: 2048

logging:
  level: debug
  format: json

response:
  shape: minimal
"#;
        let config = EstimatorConfig::parse_without_env(yaml).ok();
        assert_eq!(
            config,
            Some(EstimatorConfig {
                server: ServerSettings {
                    host: "127.0.0.1".to_owned(),
                    port: 9090,
                    max_upload_bytes: 2048,
                },
                logging: LoggingConfig {
                    level: "debug".to_owned(),
                    format: LogFormat::Json,
                },
                response: ResponseConfig {
                    shape: ResponseShape::Minimal,
                },
            })
        );
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let config = EstimatorConfig::parse_without_env("server:\n  port: 1234\n").ok();
        assert!(config.is_some_and(|c| c.server.port == 1234
            && c.server.host == "0.0.0.0"
            && c.response.shape == ResponseShape::Extended));
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = EstimatorConfig::parse_without_env("").ok();
        assert_eq!(config, Some(EstimatorConfig::default()));
    }

    #[test]
    fn unknown_shape_rejected() {
        let result = EstimatorConfig::parse_without_env("response:\n  shape: verbose\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = EstimatorConfig::default();
        let lookup = |var: &str| match var {
            ENV_HOST => Some("10.0.0.1".to_owned()),
            ENV_PORT => Some("7070".to_owned()),
            ENV_LOG_LEVEL => Some("warn".to_owned()),
            _ => None,
        };
        assert!(config.apply_env_overrides(lookup).is_ok());
        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn bad_port_override_rejected() {
        let mut config = EstimatorConfig::default();
        let lookup = |var: &str| (var == ENV_PORT).then(|| "eighty".to_owned());
        assert!(matches!(
            config.apply_env_overrides(lookup),
            Err(ConfigError::InvalidEnv { var: ENV_PORT, .. })
        ));
    }

    #[test]
    fn no_env_leaves_config_untouched() {
        let mut config = EstimatorConfig::default();
        assert!(config.apply_env_overrides(no_env).is_ok());
        assert_eq!(config, EstimatorConfig::default());
    }
}
