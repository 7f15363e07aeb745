//! Runtime configuration from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file. Unset variables fall back to defaults.

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const ENV_LOG_LEVEL: &str = "FLEXITOUT_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "FLEXITOUT_LOG_FORMAT";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "FLEXITOUT_REQUEST_TIMEOUT_MS";
pub const ENV_CHANNEL_CAPACITY: &str = "FLEXITOUT_CHANNEL_CAPACITY";
pub const ENV_MAX_KEYPOINTS: &str = "FLEXITOUT_MAX_KEYPOINTS";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Bunyan,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "bunyan" => Ok(LogFormat::Bunyan),
            other => Err(AppError::Config(format!(
                "{} must be one of pretty, json, bunyan (got '{}')",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `EnvFilter` directive, e.g. `info` or `flexitout_core=debug`
    pub log_level: String,
    pub log_format: LogFormat,
    pub request_timeout_ms: u64,
    pub channel_capacity: usize,
    /// Largest keypoint list accepted per request
    pub max_keypoints: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            request_timeout_ms: 2000,
            channel_capacity: 32,
            max_keypoints: 64,
        }
    }
}

impl Config {
    /// Load `.env` from the working directory (if any), then read the environment
    pub fn load() -> Result<Self, AppError> {
        // A missing .env file is the common case
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Load a specific env file, then read the environment.
    ///
    /// Variables already set in the process take precedence over the file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        dotenv::from_path(path).map_err(|e| {
            AppError::Config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Self::from_env()
    }

    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let log_level = env::var(ENV_LOG_LEVEL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.log_level);

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(v) => v.parse()?,
            Err(_) => defaults.log_format,
        };

        let config = Self {
            log_level,
            log_format,
            request_timeout_ms: read_positive(ENV_REQUEST_TIMEOUT_MS, defaults.request_timeout_ms)?,
            channel_capacity: read_positive(ENV_CHANNEL_CAPACITY, defaults.channel_capacity)?,
            max_keypoints: read_positive(ENV_MAX_KEYPOINTS, defaults.max_keypoints)?,
        };

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Parse a strictly positive integer variable, or return `default` when unset
fn read_positive<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(default),
    };

    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{} is not a valid number: {}", name, e)))?;

    if value <= T::default() {
        return Err(AppError::Config(format!("{} must be greater than zero", name)));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ALL_VARS: [&str; 5] = [
        ENV_LOG_LEVEL,
        ENV_LOG_FORMAT,
        ENV_REQUEST_TIMEOUT_MS,
        ENV_CHANNEL_CAPACITY,
        ENV_MAX_KEYPOINTS,
    ];

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(ALL_VARS, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.request_timeout(), Duration::from_millis(2000));
        });
    }

    #[test]
    fn test_reads_overrides() {
        temp_env::with_vars(
            [
                (ENV_LOG_LEVEL, Some("flexitout_core=debug")),
                (ENV_LOG_FORMAT, Some("Bunyan")),
                (ENV_REQUEST_TIMEOUT_MS, Some("250")),
                (ENV_CHANNEL_CAPACITY, Some("4")),
                (ENV_MAX_KEYPOINTS, Some("17")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.log_level, "flexitout_core=debug");
                assert_eq!(config.log_format, LogFormat::Bunyan);
                assert_eq!(config.request_timeout_ms, 250);
                assert_eq!(config.channel_capacity, 4);
                assert_eq!(config.max_keypoints, 17);
            },
        );
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        temp_env::with_var(ENV_CHANNEL_CAPACITY, Some("0"), || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        });
        temp_env::with_var(ENV_REQUEST_TIMEOUT_MS, Some("soon"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains(ENV_REQUEST_TIMEOUT_MS));
        });
        temp_env::with_var(ENV_LOG_FORMAT, Some("xml"), || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_load_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}=750", ENV_REQUEST_TIMEOUT_MS).unwrap();
        writeln!(file, "{}=json", ENV_LOG_FORMAT).unwrap();
        drop(file);

        temp_env::with_vars_unset(ALL_VARS, || {
            let config = Config::load_from(&path).unwrap();
            assert_eq!(config.request_timeout_ms, 750);
            assert_eq!(config.log_format, LogFormat::Json);
        });
    }

    #[test]
    fn test_missing_env_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
