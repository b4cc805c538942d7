//! Tracing subscriber setup for hosts and tests that embed the adapter.
//!
//! The adapter only emits `tracing` events; installing a subscriber is up to
//! the process. [`init_tracing`] does it with the same filter and formatting
//! conventions as the rest of the workspace.

use serde::Deserialize;
use std::env;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive such as `boards_product=debug`)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BOARDS_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `BOARDS_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("BOARDS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("BOARDS_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Build the `EnvFilter` for this configuration.
    pub fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        EnvFilter::try_new(&self.log_level).map_err(|e| TelemetryError::Filter {
            filter: self.log_level.clone(),
            reason: e.to_string(),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Install a global fmt subscriber.
///
/// Returns `Ok(false)` when another subscriber is already installed, which
/// happens when the host set up tracing itself.
pub fn init_tracing(config: &TelemetryConfig) -> Result<bool, TelemetryError> {
    let env_filter = config.env_filter()?;

    let installed = if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    match installed {
        Ok(()) => {
            tracing::info!(
                log_level = %config.log_level,
                json_logs = config.json_logs,
                "Tracing initialized"
            );
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Tracing subscriber already installed");
            Ok(false)
        }
    }
}
