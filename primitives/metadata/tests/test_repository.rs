use metadata::{
    EnumInfo, InfoData, InfoKind, InfoNode, MetadataError, ObjectInfo, Repository, Typelib,
    TypelibRepository, TypeTag, ValueInfo,
};

const TEST_TYPELIB: &str = r#"{
    "namespace": "Test",
    "version": "1.0",
    "c_prefix": "Tst",
    "infos": [
        {
            "name": "Mode",
            "kind": "enum",
            "type_name": "TstMode",
            "storage_type": "int32",
            "values": [
                {"name": "ZERO", "kind": "value", "value": 0},
                {"name": "ONE", "kind": "value", "value": 1}
            ]
        },
        {
            "name": "Widget",
            "kind": "object",
            "type_name": "TstWidget",
            "parent": "GObject.Object",
            "methods": [
                {"name": "activate", "kind": "function", "symbol": "tst_widget_activate",
                 "flags": {"is_method": true}}
            ]
        }
    ]
}"#;

fn gobject_typelib() -> Typelib {
    Typelib::new(
        "GObject",
        vec![InfoNode::new(
            "Object",
            "",
            InfoData::Object(ObjectInfo {
                type_name: "GObject".into(),
                fundamental: true,
                ..Default::default()
            }),
        )],
    )
    .with_c_prefix("G")
}

#[test]
fn test_typelib_from_json() {
    let typelib = Typelib::from_json_str(TEST_TYPELIB).expect("Failed to parse test typelib");
    assert_eq!(typelib.namespace, "Test");
    assert_eq!(typelib.infos.len(), 2);

    let mode = &typelib.infos[0];
    assert_eq!(mode.kind(), InfoKind::Enum);
    assert_eq!(mode.namespace(), "Test");
    assert_eq!(mode.as_enum().map(|e| e.storage_type), Some(TypeTag::Int32));
    let values: Vec<_> = mode.enum_values().iter().map(|v| (v.name(), v.value())).collect();
    assert_eq!(values, vec![("ZERO", Some(0)), ("ONE", Some(1))]);

    let widget = &typelib.infos[1];
    assert_eq!(widget.object_methods()[0].namespace(), "Test");
}

#[test]
fn test_repository_queries() {
    let mut repo = TypelibRepository::new();
    repo.insert(Typelib::from_json_str(TEST_TYPELIB).expect("Failed to parse test typelib"))
        .expect("Failed to insert Test");
    repo.insert(gobject_typelib()).expect("Failed to insert GObject");

    assert!(repo.require("Test").is_ok());
    assert!(matches!(repo.require("Gtk"), Err(MetadataError::NamespaceNotFound(ns)) if ns == "Gtk"));
    assert_eq!(repo.count("Test"), 2);
    assert_eq!(repo.count("Gtk"), 0);
    assert_eq!(repo.at("Test", 1).map(|n| n.name()), Some("Widget"));
    assert!(repo.at("Test", 2).is_none());
    assert_eq!(repo.c_prefix("Test").as_deref(), Some("Tst"));
    assert_eq!(repo.c_prefix("GObject").as_deref(), Some("G"));
    assert_eq!(repo.namespaces(), vec!["GObject", "Test"]);

    let widget = repo.lookup("Test", "Widget").expect("Widget should resolve");
    let parent = repo
        .resolve(widget.namespace(), widget.parent_name().expect("Widget has a parent"))
        .expect("parent should resolve across namespaces");
    assert_eq!(parent.name(), "Object");
    assert!(parent.is_fundamental());
    assert_eq!(repo.resolve("Test", "Mode").map(|n| n.kind()), Some(InfoKind::Enum));
}

#[test]
fn test_c_prefix_defaults_to_namespace() {
    let mut repo = TypelibRepository::new();
    let typelib = Typelib::new(
        "Plain",
        vec![InfoNode::new(
            "Kind",
            "",
            InfoData::Enum(EnumInfo {
                type_name: "PlainKind".into(),
                type_init: None,
                storage_type: TypeTag::Uint32,
                values: vec![InfoNode::new("A", "", InfoData::Value(ValueInfo { value: 7 }))],
                methods: Vec::new(),
            }),
        )],
    );
    repo.insert(typelib).expect("Failed to insert Plain");
    assert_eq!(repo.c_prefix("Plain").as_deref(), Some("Plain"));
    assert_eq!(repo.at("Plain", 0).map(|n| n.enum_values()[0].namespace()), Some("Plain"));
}

#[test]
fn test_duplicate_namespace_rejected() {
    let mut repo = TypelibRepository::new();
    repo.insert(gobject_typelib()).expect("Failed to insert GObject");
    let err = repo.insert(gobject_typelib()).expect_err("Expected duplicate error");
    assert!(matches!(err, MetadataError::DuplicateNamespace(ns) if ns == "GObject"));
}

#[test]
fn test_typelib_file_persistence() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("nested").join("GObject.json");
    gobject_typelib().to_file(&path).expect("Failed to write typelib");

    let repo = TypelibRepository::from_files(&[&path]).expect("Failed to load typelib file");
    assert_eq!(repo.typelib("GObject"), Some(&gobject_typelib()));

    let missing = dir.path().join("missing.json");
    let err = Typelib::from_file(&missing).expect_err("Expected I/O error");
    assert!(matches!(err, MetadataError::Io { .. }));
}
