#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Template renderer backend
//!
//! Turns the definitions built by `codegen` into text. Each slot is a snippet
//! with `{{Field}}` placeholders filled from a flat map of strings derived
//! from the payload. The built-in snippets emit Go bindings for cgo; a
//! directory of `.tmpl` files can replace them.

pub mod fields;
pub mod json;
pub mod renderer;
pub mod template_set;

use std::path::PathBuf;

use thiserror::Error;

pub use json::JsonRenderer;
pub use renderer::TemplateRenderer;
pub use template_set::{TemplateSet, REQUIRED_SNIPPETS, SNIPPET_EXTENSION};

/// Errors raised while setting up a template set.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Reading the snippet directory or a snippet failed.
    #[error("failed to read templates at {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A snippet every binding needs is absent.
    #[error("template directory {dir} has no '{name}' snippet")]
    MissingSnippet {
        /// Directory that was loaded.
        dir: PathBuf,
        /// Missing snippet name.
        name: &'static str,
    },
    /// The placeholder pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Result alias for the backend.
pub type Result<T> = std::result::Result<T, TemplateError>;
