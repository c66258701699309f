//! Entry-name blacklists.
//!
//! A blacklist file lives at `<dir>/<lowercase namespace>` and holds one entry
//! name per line. Blank lines and lines starting with `#` are ignored.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{PipelineError, Result};

/// Names of entries that must not be generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: BTreeSet<String>,
}

impl Blacklist {
    /// Parse blacklist text.
    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Path of the blacklist for `namespace` under `dir`.
    pub fn path_for(dir: &Path, namespace: &str) -> PathBuf { dir.join(namespace.to_lowercase()) }

    /// Load the blacklist for `namespace`; a missing file is an empty list.
    pub fn load(dir: &Path, namespace: &str) -> Result<Self> {
        let path = Self::path_for(dir, namespace);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let list = Self::parse(&text);
                debug!(path = %path.display(), names = list.len(), "loaded blacklist");
                Ok(list)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PipelineError::io("failed to read blacklist", path, e)),
        }
    }

    /// Whether `name` is listed.
    pub fn contains(&self, name: &str) -> bool { self.names.contains(name) }

    /// Number of listed names.
    pub fn len(&self) -> usize { self.names.len() }

    /// Whether nothing is listed.
    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let list = Blacklist::parse("# broken upstream\nWidget\n\n  Entry  \n#Label\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("Widget"));
        assert!(list.contains("Entry"));
        assert!(!list.contains("Label"));
        assert!(!list.contains("# broken upstream"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let list = Blacklist::load(dir.path(), "Gtk").expect("missing blacklist is fine");
        assert!(list.is_empty());

        std::fs::write(dir.path().join("gtk"), "Window\n").expect("Failed to write blacklist");
        let list = Blacklist::load(dir.path(), "Gtk").expect("Failed to load blacklist");
        assert!(list.contains("Window"));
    }
}
