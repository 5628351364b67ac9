//! Logging setup for the wrangle binary, built on `tracing` and `tracing-subscriber`.
//!
//! The library only emits `tracing` events; installing a subscriber is up to the binary.
//!
//! # Log Levels
//!
//! - `warn`: repaired data (e.g. out-of-range birth/death dates)
//! - `info`: skipped tables, per-table column/type summaries
//! - `debug`: dropped and downcast columns, written files

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// `--verbose` selects INFO, otherwise WARN.
    #[must_use]
    pub fn from_verbose(verbose: bool) -> Self {
        let level = if verbose { Level::INFO } else { Level::WARN };
        Self {
            level,
            ..Default::default()
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber: plain `LEVEL message` lines on stdout, no timestamps or
/// targets.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let layer = fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG` env var.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()))
}
