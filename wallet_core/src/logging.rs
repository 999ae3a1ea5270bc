//! Structured logging initialisation for applications embedding the core.
//!
//! The core itself only emits `tracing` events. Two output formats are
//! supported:
//! - [`LogFormat::Human`]: coloured, human-readable lines (development).
//! - [`LogFormat::Json`]: newline-delimited JSON (production / log aggregation).
//!
//! The filter level can be overridden at runtime via the `RUST_LOG`
//! environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{WalletConfig, WalletError};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Result<Self, WalletError> {
        match s {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(WalletError::Config(format!("unknown log format {other:?}"))),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Fails with `WalletError::Config` if a global subscriber is already set.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), WalletError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = match format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    };
    result.map_err(|e| WalletError::Config(format!("logging already initialised: {e}")))
}

/// Install the subscriber described by `config.log_format` / `config.log_level`.
pub fn init_from_config(config: &WalletConfig) -> Result<(), WalletError> {
    init_logging(LogFormat::parse(&config.log_format)?, &config.log_level)
}
