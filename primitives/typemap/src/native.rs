//! Native GLib C type names for each tag.

use metadata::TypeTag;

/// Native name of the opaque handle type.
pub const NATIVE_OPAQUE_HANDLE: &str = "gpointer";

/// Native name of the error type.
pub const NATIVE_ERROR: &str = "GError";

/// Native type name for a basic tag, or `None` when the tag is unmapped.
pub fn native_type_for_tag(tag: TypeTag) -> Option<&'static str> {
    let ty = match tag {
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
        TypeTag::GType => "gint",
        // strings travel as gchar* and are marshalled by the renderer
        TypeTag::Utf8 | TypeTag::Filename => "gchar",
        // TODO: map unichar to gunichar once the Go side has a rune conversion snippet
        TypeTag::Void
        | TypeTag::Unichar
        | TypeTag::Array
        | TypeTag::Interface
        | TypeTag::GList
        | TypeTag::GSList
        | TypeTag::GHash
        | TypeTag::Error => return None,
    };
    Some(ty)
}
