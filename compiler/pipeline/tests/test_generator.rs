use std::fs;
use std::path::Path;

use metadata::{MetadataError, Typelib, TypelibRepository};
use pipeline::{
    list_entries, load_repository, Generator, GeneratorOptions, OutputFormat, PipelineError,
};

const GOBJECT: &str = r#"{
    "namespace": "GObject",
    "c_prefix": "G",
    "infos": [
        {"name": "Object", "kind": "object", "fundamental": true}
    ]
}"#;

const TEST: &str = r#"{
    "namespace": "Test",
    "c_prefix": "Tst",
    "infos": [
        {"name": "Mode", "kind": "enum", "values": [
            {"name": "ZERO", "kind": "value", "value": 0},
            {"name": "ONE", "kind": "value", "value": 1}
        ]},
        {"name": "init", "kind": "function", "symbol": "tst_init"},
        {"name": "Widget", "kind": "object", "parent": "GObject.Object", "methods": [
            {"name": "activate", "kind": "function", "symbol": "tst_widget_activate",
             "flags": {"is_method": true}},
            {"name": "draw_char", "kind": "function", "symbol": "tst_widget_draw_char",
             "flags": {"is_method": true},
             "args": [{"name": "ch", "kind": "arg", "type": {"tag": "unichar"}}]}
        ]},
        {"name": "Broken", "kind": "object", "parent": "Widget", "methods": [
            {"name": "poke", "kind": "function", "symbol": "tst_broken_poke",
             "flags": {"is_method": true}}
        ]}
    ]
}"#;

fn repository() -> TypelibRepository {
    let mut repo = TypelibRepository::new();
    repo.insert(Typelib::from_json_str(GOBJECT).expect("Failed to parse GObject"))
        .expect("Failed to insert GObject");
    repo.insert(Typelib::from_json_str(TEST).expect("Failed to parse Test"))
        .expect("Failed to insert Test");
    repo
}

fn options(out: &Path) -> GeneratorOptions {
    GeneratorOptions { output_dir: out.to_path_buf(), ..GeneratorOptions::default() }
}

#[test]
fn test_run_writes_go_bindings() {
    let repo = repository();
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let out = dir.path().join("src").join("gi");
    let report = Generator::new(&repo, options(&out)).run("Test").expect("run should succeed");

    assert_eq!(report.namespace, "Test");
    assert_eq!(report.enums, 1);
    assert_eq!(report.objects, 2);
    // Widget: Widget; Broken: Broken + Widget
    assert_eq!(report.implements, 3);
    assert_eq!(report.skipped_kinds.get("function"), Some(&1));
    assert!(report.render_failures.is_empty());
    // draw_char is skipped on Widget and again when flattened into Broken
    assert_eq!(report.skipped_methods.len(), 2);
    assert!(report.skipped_methods.iter().all(|s| s.method == "draw_char"));

    let path = report.output_path.expect("output written");
    assert_eq!(path, out.join("test.go"));
    let text = fs::read_to_string(path).expect("readable output");
    assert!(text.starts_with("// Code generated by gigen. DO NOT EDIT.\n\npackage test\n\n"));
    assert!(text.contains("type Mode C.TstMode\n"));
    assert!(text.contains("func (self *Broken) Poke() () {"));
    assert!(text.contains("func (self *Broken) Activate() () {\n\tWidgetActivate(self)\n}"));
    assert!(!text.contains("DrawChar"));
}

#[test]
fn test_blacklist_and_header() {
    let repo = repository();
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let blacklist = dir.path().join("blacklist");
    let headers = dir.path().join("headers");
    fs::create_dir_all(&blacklist).expect("Failed to create blacklist dir");
    fs::create_dir_all(&headers).expect("Failed to create header dir");
    fs::write(blacklist.join("test"), "# not ready\nBroken\n\n").expect("Failed to write blacklist");
    fs::write(headers.join("test.go"), "package test\n\n// #include <test.h>\nimport \"C\"\n\n")
        .expect("Failed to write header");

    let mut opts = options(&dir.path().join("out"));
    opts.blacklist_dir = Some(blacklist);
    opts.header_dir = Some(headers.clone());
    let report = Generator::new(&repo, opts.clone()).run("Test").expect("run should succeed");
    assert_eq!(report.blacklisted, vec!["Broken".to_string()]);
    assert_eq!(report.objects, 1);

    let text = fs::read_to_string(report.output_path.expect("output written")).expect("readable");
    assert!(text.starts_with("package test\n\n// #include <test.h>\nimport \"C\"\n\n"));
    assert!(!text.contains("Broken"));

    // A configured header directory without the namespace's header is fatal
    fs::remove_file(headers.join("test.go")).expect("Failed to remove header");
    let err = Generator::new(&repo, opts).run("Test").expect_err("missing header");
    assert!(matches!(err, PipelineError::Io { .. }));
}

#[test]
fn test_setup_failures() {
    let repo = repository();
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");

    let err = Generator::new(&repo, options(dir.path())).run("Gtk").expect_err("unknown namespace");
    assert!(matches!(err, PipelineError::Metadata(MetadataError::NamespaceNotFound(ref ns)) if ns == "Gtk"));
    assert!(!dir.path().join("gtk.go").exists());

    let mut opts = options(dir.path());
    opts.templates_dir = Some(dir.path().join("no-snippets"));
    let err = Generator::new(&repo, opts).run("Test").expect_err("missing snippets");
    assert!(matches!(err, PipelineError::Templates(_)));

    // Output directory path occupied by a file
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").expect("Failed to write blocker");
    let err = Generator::new(&repo, options(&blocker)).run("Test").expect_err("unwritable output");
    assert!(matches!(err, PipelineError::Io { .. }));
}

#[test]
fn test_dry_run_and_json() {
    let repo = repository();
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");

    let mut opts = options(dir.path());
    opts.dry_run = true;
    let report = Generator::new(&repo, opts).run("Test").expect("dry run should succeed");
    assert!(report.output_path.is_none());
    assert_eq!(report.enums, 1);
    assert!(!dir.path().join("test.go").exists());

    let mut opts = options(dir.path());
    opts.format = OutputFormat::Json;
    let report = Generator::new(&repo, opts).run("Test").expect("json run should succeed");
    let path = report.output_path.expect("output written");
    assert_eq!(path, dir.path().join("test.jsonl"));
    let text = fs::read_to_string(path).expect("readable output");
    let first: serde_json::Value =
        serde_json::from_str(text.lines().next().expect("at least one line")).expect("json line");
    assert_eq!(first["slot"], "enum");
    assert_eq!(first["definition"]["enum_name"], "Mode");
}

#[test]
fn test_list_and_load() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let gobject = dir.path().join("GObject.json");
    let test = dir.path().join("Test.json");
    fs::write(&gobject, GOBJECT).expect("Failed to write typelib");
    fs::write(&test, TEST).expect("Failed to write typelib");

    let repo = load_repository(&[gobject, test]).expect("Failed to load typelibs");
    let entries = list_entries(&repo, "Test").expect("Failed to list entries");
    let names: Vec<_> = entries.iter().map(|e| (e.index, e.name.as_str())).collect();
    assert_eq!(names, vec![(0, "Mode"), (1, "init"), (2, "Widget"), (3, "Broken")]);
    assert_eq!(entries[1].kind, metadata::InfoKind::Function);

    assert!(list_entries(&repo, "Gtk").is_err());
    assert!(matches!(
        load_repository(&[dir.path().join("absent.json")]),
        Err(PipelineError::Metadata(MetadataError::Io { .. }))
    ));
}
