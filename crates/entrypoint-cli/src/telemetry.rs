//! Structured telemetry for a single entrypoint invocation.
//!
//! The entrypoint dispatches once and exits, so the subscriber is scoped to
//! that run with [`tracing::dispatcher::with_default`] rather than installed
//! as the process-wide default.

use std::io::{self, IsTerminal};

use thiserror::Error;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use entrypoint_config::{Config, LogFormat};

/// Errors encountered while configuring telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured log filter expression does not parse.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Rejected filter expression.
        filter: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Builds the dispatcher that writes this run's events to standard error.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the configured filter does not
/// parse.
pub fn dispatch(config: &Config) -> Result<Dispatch, TelemetryError> {
    let filter =
        EnvFilter::try_new(config.log_filter()).map_err(|error| TelemetryError::Filter {
            filter: config.log_filter().to_owned(),
            message: error.to_string(),
        })?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        // Step logs are usually captured by the container runtime.
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Dispatch::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Dispatch::new(builder.compact().finish()),
    })
}
