//! Go target adapter.

use metadata::TypeTag;

use crate::type_adapter::TypeAdapter;

/// Emits Go type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTypeAdapter;

impl TypeAdapter for GoTypeAdapter {
    fn language(&self) -> &str { "go" }

    fn map_tag_to_target(&self, tag: TypeTag) -> Option<&'static str> {
        let ty = match tag {
            TypeTag::Boolean => "bool",
            TypeTag::Int8 => "int8",
            TypeTag::Uint8 => "uint8",
            TypeTag::Int16 => "int16",
            TypeTag::Uint16 => "uint16",
            TypeTag::Int32 => "int32",
            TypeTag::Uint32 => "uint32",
            TypeTag::Int64 => "int64",
            TypeTag::Uint64 => "uint64",
            TypeTag::Float => "float32",
            TypeTag::Double => "float64",
            TypeTag::GType => "int",
            TypeTag::Utf8 | TypeTag::Filename => "string",
            _ => return None,
        };
        Some(ty)
    }

    fn opaque_handle(&self) -> &'static str { "interface{}" }

    fn error_type(&self) -> &'static str { "error" }
}
