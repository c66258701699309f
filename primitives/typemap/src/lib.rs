#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Type mapping for binding generation.
//!
//! Maps the fixed vocabulary of primitive type tags onto two parallel type
//! systems: the native ABI's type names (GLib C types) and the target
//! language's type names. The native side is a fixed table; the target side
//! is supplied by a [`TypeAdapter`], so another output language only needs a
//! new adapter.
//!
//! Container and reference tags (arrays, lists, hashes, interfaces, errors) and
//! `unichar` have no mapping yet and always fail with [`UnsupportedType`].

use metadata::{TypeInfo, TypeTag};
use serde::Serialize;
use thiserror::Error;

/// Target-language type adapters.
pub mod adapters;
/// Native ABI type table.
pub mod native;
/// Target-language adapter trait.
pub mod type_adapter;

pub use adapters::GoTypeAdapter;
pub use type_adapter::TypeAdapter;

/// A type tag with no entry in the mapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported type tag '{tag}'")]
pub struct UnsupportedType {
    /// The offending tag.
    pub tag: TypeTag,
}

/// What a mapped type stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeClass {
    /// A concrete primitive value.
    Value,
    /// An opaque pointer-sized handle (`void *`).
    OpaqueHandle,
    /// The language's error type for throwing callables.
    Error,
}

/// A resolved pair of type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedType {
    /// Native ABI type name, e.g. `gint32`.
    pub native: String,
    /// Target-language type name, e.g. `int32`.
    pub target: String,
    /// Value, opaque handle or error.
    pub class: TypeClass,
}

impl MappedType {
    fn new(native: &str, target: &str, class: TypeClass) -> Self {
        Self { native: native.to_string(), target: target.to_string(), class }
    }

    /// Whether this is the opaque handle pair.
    pub fn is_opaque_handle(&self) -> bool { self.class == TypeClass::OpaqueHandle }
}

/// Maps type tags to native and target type names.
pub struct TypeMapper {
    adapter: Box<dyn TypeAdapter>,
}

impl TypeMapper {
    /// Create a mapper for the target language described by `adapter`.
    pub fn new(adapter: Box<dyn TypeAdapter>) -> Self { Self { adapter } }

    /// Mapper producing Go bindings.
    pub fn go() -> Self { Self::new(Box::new(GoTypeAdapter)) }

    /// The target-language adapter in use.
    pub fn adapter(&self) -> &dyn TypeAdapter { self.adapter.as_ref() }

    /// Map a bare tag.
    ///
    /// `Void` has no value representation and fails like any unmapped tag;
    /// callers deal with void pointers and "returns nothing" before asking,
    /// or use [`TypeMapper::map_type`].
    pub fn map_tag(&self, tag: TypeTag) -> Result<MappedType, UnsupportedType> {
        let native = native::native_type_for_tag(tag);
        let target = self.adapter.map_tag_to_target(tag);
        match (native, target) {
            (Some(native), Some(target)) => Ok(MappedType::new(native, target, TypeClass::Value)),
            _ => Err(UnsupportedType { tag }),
        }
    }

    /// Map a full type description, honouring the void-pointer escape.
    pub fn map_type(&self, type_info: &TypeInfo) -> Result<MappedType, UnsupportedType> {
        if type_info.is_opaque_handle() {
            return Ok(self.opaque_handle());
        }
        self.map_tag(type_info.tag)
    }

    /// The opaque handle pair.
    pub fn opaque_handle(&self) -> MappedType {
        MappedType::new(
            native::NATIVE_OPAQUE_HANDLE,
            self.adapter.opaque_handle(),
            TypeClass::OpaqueHandle,
        )
    }

    /// The error pair used for throwing callables.
    pub fn error_type(&self) -> MappedType {
        MappedType::new(native::NATIVE_ERROR, self.adapter.error_type(), TypeClass::Error)
    }
}

impl Default for TypeMapper {
    fn default() -> Self { Self::go() }
}

impl std::fmt::Debug for TypeMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeMapper").field("language", &self.adapter.language()).finish()
    }
}
