#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the generator.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once to
//! install a formatting subscriber on stderr.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level or filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// A global subscriber was already installed.
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

/// Build a filter from `RUST_LOG` when set, otherwise from `level`.
pub fn filter_for(level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| level.to_string());
    EnvFilter::try_new(&directive)
        .map_err(|source| LoggingError::InvalidFilter { directive, source })
}

/// Install a stderr subscriber filtered at `level` (e.g. `"info"`, `"gigen=debug"`).
pub fn init(level: &str) -> Result<(), LoggingError> {
    let filter = filter_for(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}
