//! Type descriptions attached to arguments, return values, fields and constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive classification of a type as reported by the metadata.
///
/// The first fifteen tags and [`TypeTag::Unichar`] are *basic*; the remaining
/// tags describe containers and references to other registered types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// No value, or an untyped pointer when the pointer flag is set.
    Void,
    /// Boolean.
    Boolean,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Runtime type identifier.
    #[serde(rename = "gtype")]
    GType,
    /// UTF-8 encoded string.
    Utf8,
    /// Filename in the platform encoding.
    Filename,
    /// C array, growable array, pointer array or byte array.
    Array,
    /// Reference to another registered type.
    Interface,
    /// Doubly linked list.
    #[serde(rename = "glist")]
    GList,
    /// Singly linked list.
    #[serde(rename = "gslist")]
    GSList,
    /// Hash table.
    #[serde(rename = "ghash")]
    GHash,
    /// Error domain value.
    Error,
    /// Unicode code point.
    Unichar,
}

impl TypeTag {
    /// Every tag, in metadata order.
    pub const ALL: [TypeTag; 22] = [
        TypeTag::Void,
        TypeTag::Boolean,
        TypeTag::Int8,
        TypeTag::Uint8,
        TypeTag::Int16,
        TypeTag::Uint16,
        TypeTag::Int32,
        TypeTag::Uint32,
        TypeTag::Int64,
        TypeTag::Uint64,
        TypeTag::Float,
        TypeTag::Double,
        TypeTag::GType,
        TypeTag::Utf8,
        TypeTag::Filename,
        TypeTag::Array,
        TypeTag::Interface,
        TypeTag::GList,
        TypeTag::GSList,
        TypeTag::GHash,
        TypeTag::Error,
        TypeTag::Unichar,
    ];

    /// Whether the tag is a basic (non-container) type.
    pub fn is_basic(&self) -> bool {
        !matches!(
            self,
            TypeTag::Array
                | TypeTag::Interface
                | TypeTag::GList
                | TypeTag::GSList
                | TypeTag::GHash
                | TypeTag::Error
        )
    }

    /// Metadata spelling of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Void => "void",
            TypeTag::Boolean => "gboolean",
            TypeTag::Int8 => "gint8",
            TypeTag::Uint8 => "guint8",
            TypeTag::Int16 => "gint16",
            TypeTag::Uint16 => "guint16",
            TypeTag::Int32 => "gint32",
            TypeTag::Uint32 => "guint32",
            TypeTag::Int64 => "gint64",
            TypeTag::Uint64 => "guint64",
            TypeTag::Float => "gfloat",
            TypeTag::Double => "gdouble",
            TypeTag::GType => "GType",
            TypeTag::Utf8 => "utf8",
            TypeTag::Filename => "filename",
            TypeTag::Array => "array",
            TypeTag::Interface => "interface",
            TypeTag::GList => "glist",
            TypeTag::GSList => "gslist",
            TypeTag::GHash => "ghash",
            TypeTag::Error => "error",
            TypeTag::Unichar => "gunichar",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Array flavour of a [`TypeTag::Array`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayType {
    /// Plain C array.
    #[default]
    C,
    /// Growable array.
    Array,
    /// Array of pointers.
    PtrArray,
    /// Array of bytes.
    ByteArray,
}

/// Parameter passing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Caller provides the value.
    #[default]
    In,
    /// Callee writes the value.
    Out,
    /// Caller provides the value, callee may replace it.
    InOut,
}

impl Direction {
    /// Whether the caller supplies a value (`In` or `InOut`).
    pub fn is_input(&self) -> bool { matches!(self, Direction::In | Direction::InOut) }

    /// Whether the callee hands a value back (`Out` or `InOut`).
    pub fn is_output(&self) -> bool { matches!(self, Direction::Out | Direction::InOut) }
}

/// Ownership transfer of a value across the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transfer {
    /// Ownership stays with the callee.
    #[default]
    Nothing,
    /// Only the container is transferred.
    Container,
    /// The container and its elements are transferred.
    Everything,
}

/// Lifetime scope of a callback argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    /// Not a callback.
    #[default]
    Invalid,
    /// Valid for the duration of the call.
    Call,
    /// Valid until first invocation.
    Async,
    /// Valid until the destroy notify fires.
    Notified,
}

/// Description of a single type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Primitive classification.
    pub tag: TypeTag,
    /// Whether the value is passed by pointer.
    #[serde(default)]
    pub pointer: bool,
    /// Element types of containers (one for arrays and lists, two for hashes).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub param_types: Vec<TypeInfo>,
    /// Name of the referenced registered type for [`TypeTag::Interface`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Index of the argument carrying the array length, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_length: Option<usize>,
    /// Fixed array size, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_fixed_size: Option<usize>,
    /// Whether the array is terminated by a zero element.
    #[serde(default)]
    pub zero_terminated: bool,
    /// Array flavour; only meaningful for [`TypeTag::Array`].
    #[serde(default)]
    pub array_type: ArrayType,
}

impl TypeInfo {
    /// Build a plain type description with every optional attribute unset.
    pub fn new(tag: TypeTag, pointer: bool) -> Self {
        Self {
            tag,
            pointer,
            param_types: Vec::new(),
            interface: None,
            array_length: None,
            array_fixed_size: None,
            zero_terminated: false,
            array_type: ArrayType::default(),
        }
    }

    /// Non-pointer void: the "returns nothing" type.
    pub fn void() -> Self { Self::new(TypeTag::Void, false) }

    /// Whether a value of this type is actually produced.
    ///
    /// Only a non-pointer void produces nothing; a void pointer is an opaque
    /// value.
    pub fn returns_value(&self) -> bool { self.pointer || self.tag != TypeTag::Void }

    /// Whether this is the void-pointer opaque handle type.
    pub fn is_opaque_handle(&self) -> bool { self.pointer && self.tag == TypeTag::Void }

    /// Element type `n` of a container type.
    pub fn param_type(&self, n: usize) -> Option<&TypeInfo> { self.param_types.get(n) }
}

impl Default for TypeInfo {
    fn default() -> Self { Self::void() }
}
