//! Tracing subscriber setup for the command-line front end.

use crate::config::LoggingConfig;

use std::io::{self, IsTerminal};
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Builds the event filter: `RUST_LOG` when set, otherwise the configured level.
pub fn filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| LoggingError::InvalidFilter(e.to_string())),
    }
}

/// Installs a stderr fmt subscriber so reports on stdout stay clean.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let layer = fmt::layer()
        .with_ansi(io::stderr().is_terminal())
        .with_target(true)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter(config)?)
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
