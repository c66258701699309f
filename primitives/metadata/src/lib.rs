// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Introspection metadata model.
//!
//! This crate describes the metadata graph of a namespace: a flat, ordered
//! sequence of info nodes (functions, objects, enums, ...) whose kind-specific
//! attributes are reached through capability-gated accessors. The graph is
//! owned by a [`Repository`]; the generator only ever borrows nodes from it,
//! so every node handed out is released when the borrow ends.

pub mod flags;
pub mod info;
pub mod repository;
pub mod type_info;

use std::path::PathBuf;

use thiserror::Error;

pub use flags::{FunctionFlags, SignalFlags, VFuncFlags};
pub use info::{
    ArgInfo, CallableInfo, ConstantInfo, EnumInfo, FieldInfo, FunctionInfo, InfoData, InfoKind,
    InfoNode, InterfaceInfo, ObjectInfo, PropertyInfo, SignalInfo, StructInfo, ValueInfo,
    VFuncInfo,
};
pub use repository::{Repository, Typelib, TypelibRepository};
pub use type_info::{ArrayType, Direction, ScopeType, Transfer, TypeInfo, TypeTag};

/// Errors raised while loading or querying metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The requested namespace has not been loaded into the repository.
    #[error("namespace '{0}' is not available in the repository")]
    NamespaceNotFound(String),
    /// Two typelib documents declared the same namespace.
    #[error("namespace '{0}' was loaded more than once")]
    DuplicateNamespace(String),
    /// Failed to read a typelib document from disk.
    #[error("failed to read typelib '{path}': {source}")]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A typelib document was not valid JSON for the metadata model.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
