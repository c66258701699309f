#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Collection of utilities for the gigen command line.

use std::path::PathBuf;

use config::Config;
use thiserror::Error;

/// Errors that can occur during gigen operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The logger could not be installed.
    #[error(transparent)]
    Logging(#[from] gigen_logging::LoggingError),
    /// The generation run failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
}

/// Result type alias for gigen operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Namespace to generate.
    pub namespace: Option<String>,
    /// Typelib documents; replace the configured list when non-empty.
    pub typelibs: Vec<PathBuf>,
    /// Snippet directory.
    pub templates_dir: Option<PathBuf>,
    /// Blacklist directory.
    pub blacklist_dir: Option<PathBuf>,
    /// Header directory.
    pub header_dir: Option<PathBuf>,
    /// Output directory.
    pub output_dir: Option<PathBuf>,
    /// Log level or filter directive.
    pub log_level: Option<String>,
    /// Bound on ancestor walks.
    pub max_ancestor_depth: Option<usize>,
}

impl Overrides {
    /// Write every value that was given into `config`.
    pub fn apply(self, config: &mut Config) {
        let generator = &mut config.generator;
        if self.namespace.is_some() {
            generator.namespace = self.namespace;
        }
        if !self.typelibs.is_empty() {
            generator.typelibs = self.typelibs;
        }
        if self.templates_dir.is_some() {
            generator.templates_dir = self.templates_dir;
        }
        if self.blacklist_dir.is_some() {
            generator.blacklist_dir = self.blacklist_dir;
        }
        if self.header_dir.is_some() {
            generator.header_dir = self.header_dir;
        }
        if let Some(depth) = self.max_ancestor_depth {
            generator.max_ancestor_depth = depth;
        }
        if let Some(dir) = self.output_dir {
            config.output.output_dir = dir;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

/// Load the configuration at `path`, or the default file when it exists.
pub fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    Ok(match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    })
}
