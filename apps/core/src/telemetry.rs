//! Tracing subscriber setup.
//!
//! Logs always go to stderr: stdout is reserved for responses.

use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{Config, LogFormat};
use crate::error::AppError;

/// Name reported by the bunyan formatter
pub const APP_NAME: &str = "flexitout-core";

/// Build the `EnvFilter` for a configured directive.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn env_filter(config: &Config) -> Result<EnvFilter, AppError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", config.log_level, e)))
}

/// Install the global subscriber. Call once, at startup.
pub fn init(config: &Config) -> Result<(), AppError> {
    let registry = Registry::default().with(env_filter(config)?);

    let result = match config.log_format {
        LogFormat::Pretty => set_global_default(
            registry.with(fmt::layer().with_target(true).with_writer(std::io::stderr)),
        ),
        LogFormat::Json => set_global_default(
            registry.with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            ),
        ),
        LogFormat::Bunyan => set_global_default(
            registry
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stderr)),
        ),
    };

    result.map_err(|e| AppError::Internal(format!("Failed to install tracing subscriber: {}", e)))
}
