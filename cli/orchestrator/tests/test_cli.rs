use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

const GOBJECT: &str = r#"{
    "namespace": "GObject",
    "c_prefix": "G",
    "infos": [{"name": "Object", "kind": "object", "fundamental": true}]
}"#;

const TEST: &str = r#"{
    "namespace": "Test",
    "c_prefix": "Tst",
    "infos": [
        {"name": "Mode", "kind": "enum", "values": [{"name": "ZERO", "kind": "value", "value": 0}]},
        {"name": "Widget", "kind": "object", "parent": "GObject.Object", "methods": [
            {"name": "activate", "kind": "function", "symbol": "tst_widget_activate",
             "flags": {"is_method": true}}
        ]}
    ]
}"#;

fn write_typelibs(dir: &Path) -> (PathBuf, PathBuf) {
    let gobject = dir.join("GObject.json");
    let test = dir.join("Test.json");
    fs::write(&gobject, GOBJECT).expect("Failed to write typelib");
    fs::write(&test, TEST).expect("Failed to write typelib");
    (gobject, test)
}

fn gigen(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gigen"));
    // keep the user's config file out of the way
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn generate_writes_bindings() {
    let tmp = tempdir().expect("Failed to create temporary directory");
    let (gobject, test) = write_typelibs(tmp.path());
    let out = tmp.path().join("gi");

    gigen(tmp.path())
        .arg("generate")
        .arg("Test")
        .arg("--typelib")
        .arg(&gobject)
        .arg("--typelib")
        .arg(&test)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Test: 1 enums, 1 objects, 1 implements, 1 functions"))
        .stdout(predicate::str::contains("Bindings written to"))
        .stderr(predicate::str::contains("Generating Test bindings..."));

    let text = fs::read_to_string(out.join("test.go")).expect("bindings written");
    assert!(text.contains("func WidgetActivate(self WidgetLike) () {"));
}

#[test]
fn generate_dry_run_and_json() {
    let tmp = tempdir().expect("Failed to create temporary directory");
    let (gobject, test) = write_typelibs(tmp.path());
    let out = tmp.path().join("gi");

    gigen(tmp.path())
        .args(["generate", "Test", "--dry-run"])
        .arg("--typelib")
        .arg(&gobject)
        .arg("--typelib")
        .arg(&test)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run, nothing written"));
    assert!(!out.exists());

    gigen(tmp.path())
        .args(["generate", "Test", "--format", "json"])
        .arg("--typelib")
        .arg(&gobject)
        .arg("--typelib")
        .arg(&test)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    assert!(out.join("test.jsonl").exists());
}

#[test]
fn generate_reports_setup_failures() {
    let tmp = tempdir().expect("Failed to create temporary directory");
    let (gobject, test) = write_typelibs(tmp.path());

    gigen(tmp.path())
        .args(["generate", "Gtk"])
        .arg("--typelib")
        .arg(&gobject)
        .arg("--typelib")
        .arg(&test)
        .assert()
        .failure()
        .stderr(predicate::str::contains("namespace 'Gtk' is not available"));

    gigen(tmp.path())
        .arg("generate")
        .arg("--typelib")
        .arg(&test)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no namespace given"));
}

#[test]
fn config_file_supplies_inputs() {
    let tmp = tempdir().expect("Failed to create temporary directory");
    let (gobject, test) = write_typelibs(tmp.path());
    let out = tmp.path().join("from-config");
    let config = tmp.path().join("gigen.toml");
    fs::write(
        &config,
        format!(
            "[generator]\nnamespace = \"Test\"\ntypelibs = [{:?}, {:?}]\n\n[output]\noutput_dir = {:?}\n",
            gobject, test, out
        ),
    )
    .expect("Failed to write config");

    gigen(tmp.path()).arg("generate").arg("--config").arg(&config).assert().success();
    assert!(out.join("test.go").exists());

    gigen(tmp.path())
        .args(["list", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("0\tenum\tMode\n1\tobject\tWidget\n"));
}
