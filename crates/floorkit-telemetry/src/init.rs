//! Logging initialisation for browser consoles and other line-oriented sinks.
//!
//! # Design
//! - Every formatted line goes to a caller-supplied sink.
//! - The level string is an `EnvFilter` directive such as `info` or `floorkit_core=debug`.
//! - No timestamps or ANSI colours; consoles add their own.

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, TelemetryError};
use crate::sink::LineSinkMakeWriter;

/// Default filter directive when the caller has no preference.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Install the global subscriber so every formatted line goes to `sink`.
///
/// Used in the browser, where `sink` forwards to the developer console.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_sink<F>(level: &str, sink: F) -> Result<()>
where
    F: Fn(&str) + Send + Sync + 'static,
{
    sink_subscriber(level, sink)
        .try_init()
        .map_err(|source| TelemetryError::SubscriberInstall { source })
}

/// Build (without installing) a compact subscriber that writes lines to `sink`.
pub fn sink_subscriber<F>(level: &str, sink: F) -> impl Subscriber + Send + Sync + 'static
where
    F: Fn(&str) + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_writer(LineSinkMakeWriter::new(sink));
    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(layer)
}
