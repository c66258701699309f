use metadata::{TypeInfo, TypeTag};
use typemap::{GoTypeAdapter, TypeAdapter, TypeClass, TypeMapper, UnsupportedType};

const SUPPORTED: [TypeTag; 14] = [
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
];

const COMPOSITE: [TypeTag; 6] = [
    TypeTag::Array,
    TypeTag::Interface,
    TypeTag::GList,
    TypeTag::GSList,
    TypeTag::GHash,
    TypeTag::Error,
];

#[test]
fn test_supported_tags_map_to_non_empty_pairs() {
    let mapper = TypeMapper::go();
    for tag in SUPPORTED {
        let mapped = mapper.map_tag(tag).unwrap_or_else(|e| panic!("{tag:?} failed: {e}"));
        assert!(!mapped.native.is_empty(), "{tag:?} has empty native type");
        assert!(!mapped.target.is_empty(), "{tag:?} has empty target type");
        assert_eq!(mapped.class, TypeClass::Value);
    }
}

#[test]
fn test_composite_tags_fail() {
    let mapper = TypeMapper::go();
    for tag in COMPOSITE {
        assert_eq!(mapper.map_tag(tag), Err(UnsupportedType { tag }));
        // the pointer flag never rescues a composite tag
        assert_eq!(mapper.map_type(&TypeInfo::new(tag, true)), Err(UnsupportedType { tag }));
    }
    assert!(mapper.map_tag(TypeTag::Unichar).is_err());
}

#[test]
fn test_specific_mappings() {
    let mapper = TypeMapper::go();
    let cases = [
        (TypeTag::Boolean, "gboolean", "bool"),
        (TypeTag::Float, "gfloat", "float32"),
        (TypeTag::Double, "gdouble", "float64"),
        (TypeTag::Uint64, "guint64", "uint64"),
        (TypeTag::GType, "gint", "int"),
        (TypeTag::Utf8, "gchar", "string"),
        (TypeTag::Filename, "gchar", "string"),
    ];
    for (tag, native, target) in cases {
        let mapped = mapper.map_tag(tag).expect("supported tag");
        assert_eq!((mapped.native.as_str(), mapped.target.as_str()), (native, target));
    }
}

#[test]
fn test_void_pointer_is_opaque_handle() {
    let mapper = TypeMapper::go();
    let mapped = mapper.map_type(&TypeInfo::new(TypeTag::Void, true)).expect("void pointer");
    assert!(mapped.is_opaque_handle());
    assert_eq!(mapped.native, "gpointer");
    assert_eq!(mapped.target, "interface{}");

    // a bare void has no value representation
    assert_eq!(
        mapper.map_type(&TypeInfo::void()),
        Err(UnsupportedType { tag: TypeTag::Void })
    );
}

#[test]
fn test_pointer_to_basic_type_maps_like_the_tag() {
    let mapper = TypeMapper::go();
    let mapped = mapper.map_type(&TypeInfo::new(TypeTag::Utf8, true)).expect("utf8 pointer");
    assert_eq!(mapped, mapper.map_tag(TypeTag::Utf8).expect("utf8"));
}

#[test]
fn test_error_type() {
    let mapper = TypeMapper::default();
    let error = mapper.error_type();
    assert_eq!(error.native, "GError");
    assert_eq!(error.target, "error");
    assert_eq!(error.class, TypeClass::Error);
    assert_eq!(GoTypeAdapter.language(), "go");
    assert_eq!(mapper.adapter().language(), "go");
}

#[test]
fn test_unsupported_type_message() {
    let err = UnsupportedType { tag: TypeTag::GHash };
    assert_eq!(err.to_string(), "unsupported type tag 'ghash'");
}
