#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Binding definitions built from introspection metadata.
//!
//! This crate sits between the metadata graph and the output: it classifies
//! callable parameters into native and target-language lists, builds the
//! enum, object and function definitions for every processed entry, and hands
//! each one to a [`Renderer`] under a named template slot. It never formats
//! output itself; snippet text lives in the template backends.

pub mod builder;
pub mod classifier;
pub mod context;
pub mod definitions;
pub mod render;
pub mod utils;

use metadata::InfoKind;
use thiserror::Error;

pub use builder::{
    ancestors, has_parent, process_enum, process_object, EntryOutcome, Lineage, RenderFailure,
    SkippedMethod,
};
pub use classifier::{read_params, ClassifiedParams};
pub use context::{GenerationContext, GenerationContextBuilder};
pub use definitions::{
    ArgsAndRets, EnumDefinition, EnumValue, FunctionDefinition, ObjectDefinition, Parameter,
};
pub use render::{
    Payload, RecordedCall, RecordedPayload, RecordingRenderer, RenderError, Renderer, TemplateSlot,
};

/// Error type for definition building.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A parameter or return type has no mapping.
    #[error("cannot bind '{callable}': parameter '{parameter}' has an {source}")]
    UnsupportedType {
        /// Callable being classified.
        callable: String,
        /// Offending parameter, `retval` for the return value.
        parameter: String,
        /// The failed mapping.
        #[source]
        source: typemap::UnsupportedType,
    },
    /// A node was handed to a stage that does not accept its kind.
    #[error("'{name}' is a {found} node, expected {expected}")]
    UnexpectedKind {
        /// Name of the node.
        name: String,
        /// Kind the stage accepts.
        expected: &'static str,
        /// Kind of the node.
        found: InfoKind,
    },
    /// A parent reference did not resolve to an object.
    #[error("parent '{parent}' of '{object}' could not be resolved")]
    MissingParent {
        /// Object whose parent is missing.
        object: String,
        /// The unresolved reference.
        parent: String,
    },
    /// The parent chain ended at an object that is neither the root nor fundamental.
    #[error("ancestor chain of '{object}' ends at '{class}', which has no parent")]
    Unrooted {
        /// Object whose chain was walked.
        object: String,
        /// Last object reached.
        class: String,
    },
    /// The parent chain revisited an object.
    #[error("ancestor chain of '{object}' loops back to '{repeated}'")]
    AncestorCycle {
        /// Object whose chain was walked.
        object: String,
        /// First object seen twice.
        repeated: String,
    },
    /// The parent chain exceeded the configured depth.
    #[error("ancestor chain of '{object}' is deeper than {limit}")]
    AncestorDepthExceeded {
        /// Object whose chain was walked.
        object: String,
        /// The configured bound.
        limit: usize,
    },
    /// The renderer rejected a definition.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;
