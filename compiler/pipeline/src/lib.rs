#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns one namespace into a bindings file.
//!
//! The pipeline owns everything around the generator core: it loads the
//! metadata documents, applies the namespace blacklist, picks a renderer,
//! walks the namespace's entries in index order and writes the result.
//!
//! ## Module Organization
//!
//! - `blacklist` - Per-namespace lists of entry names to leave out
//! - `output` - Header lookup and output file placement
//! - `generator` - The namespace walk and its report

use std::path::PathBuf;

use thiserror::Error;

pub mod blacklist;
pub mod generator;
pub mod output;

pub use blacklist::Blacklist;
pub use generator::{
    list_entries, load_repository, EntrySummary, GenerationReport, Generator, GeneratorOptions,
    OutputFormat,
};
pub use output::{default_header, output_file_name, read_header, write_output};

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that stop a generation run before or after the walk.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The namespace could not be loaded or a typelib was unreadable.
    #[error(transparent)]
    Metadata(#[from] metadata::MetadataError),
    /// The snippet directory was incomplete or unreadable.
    #[error(transparent)]
    Templates(#[from] templates::TemplateError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// A header, blacklist or output file could not be read or written.
    #[error("{action} '{path}': {source}")]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// No namespace was named on the command line or in the configuration.
    #[error("no namespace given")]
    MissingNamespace,
}

impl PipelineError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}
