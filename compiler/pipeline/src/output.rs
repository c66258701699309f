//! Header lookup and output placement.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::generator::OutputFormat;
use crate::{PipelineError, Result};

/// Preamble used when no header directory is configured.
pub fn default_header(namespace: &str) -> String {
    format!("// Code generated by gigen. DO NOT EDIT.\n\npackage {}\n\n", namespace.to_lowercase())
}

/// Read `<dir>/<lowercase namespace>.go`; the file must exist.
pub fn read_header(dir: &Path, namespace: &str) -> Result<String> {
    let path = dir.join(format!("{}.go", namespace.to_lowercase()));
    std::fs::read_to_string(&path).map_err(|e| PipelineError::io("failed to read header", path, e))
}

/// File name of the bindings for `namespace`.
pub fn output_file_name(namespace: &str, format: OutputFormat) -> String {
    format!("{}.{}", namespace.to_lowercase(), format.extension())
}

/// Create `dir` if needed and write `contents` to the bindings file in it.
pub fn write_output(
    dir: &Path,
    namespace: &str,
    format: OutputFormat,
    contents: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| PipelineError::io("failed to create output directory", dir, e))?;
    let path = dir.join(output_file_name(namespace, format));
    std::fs::write(&path, contents)
        .map_err(|e| PipelineError::io("failed to write bindings", &path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote bindings");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        assert!(matches!(read_header(dir.path(), "Gtk"), Err(PipelineError::Io { .. })));

        std::fs::write(dir.path().join("gtk.go"), "package gtk\n").expect("Failed to write header");
        assert_eq!(read_header(dir.path(), "Gtk").expect("header exists"), "package gtk\n");
        assert!(default_header("GLib").contains("package glib\n"));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let nested = dir.path().join("src").join("gi");
        let path = write_output(&nested, "Gtk", OutputFormat::Go, "package gtk\n")
            .expect("Failed to write output");
        assert_eq!(path, nested.join("gtk.go"));
        assert_eq!(std::fs::read_to_string(path).expect("readable"), "package gtk\n");
        assert_eq!(output_file_name("Gtk", OutputFormat::Json), "gtk.jsonl");
    }
}
