//! Repositories of loaded namespaces.
//!
//! The generator consumes metadata only through the [`Repository`] trait. The
//! bundled [`TypelibRepository`] keeps typelib documents in memory, loaded from
//! JSON dumps of the introspection data.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::info::InfoNode;
use crate::{MetadataError, Result};

/// Read-only access to the metadata graph of loaded namespaces.
pub trait Repository {
    /// Make sure `namespace` is loaded.
    fn require(&self, namespace: &str) -> Result<()>;

    /// Number of top-level entries in `namespace`; zero when not loaded.
    fn count(&self, namespace: &str) -> usize;

    /// Top-level entry `index` of `namespace`.
    fn at(&self, namespace: &str, index: usize) -> Option<&InfoNode>;

    /// Prefix of native identifiers in `namespace` (e.g. `Gtk`).
    fn c_prefix(&self, namespace: &str) -> Option<String>;

    /// Resolve a top-level entry by name.
    fn lookup(&self, namespace: &str, name: &str) -> Option<&InfoNode>;

    /// Resolve a `Name` or `Namespace.Name` reference relative to `namespace`.
    fn resolve(&self, namespace: &str, reference: &str) -> Option<&InfoNode> {
        match reference.split_once('.') {
            Some((ns, name)) => self.lookup(ns, name),
            None => self.lookup(namespace, reference),
        }
    }
}

/// One namespace worth of metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typelib {
    /// Namespace identifier.
    pub namespace: String,
    /// Namespace version.
    #[serde(default)]
    pub version: String,
    /// Prefix of native identifiers; defaults to the namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_prefix: Option<String>,
    /// Top-level entries in index order.
    #[serde(default)]
    pub infos: Vec<InfoNode>,
}

impl Typelib {
    /// Create a typelib, stamping `namespace` onto every entry lacking one.
    pub fn new(namespace: impl Into<String>, infos: Vec<InfoNode>) -> Self {
        let mut typelib =
            Self { namespace: namespace.into(), version: String::new(), c_prefix: None, infos };
        typelib.adopt_entries();
        typelib
    }

    /// Set the native identifier prefix.
    pub fn with_c_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.c_prefix = Some(prefix.into());
        self
    }

    /// Parse a typelib document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut typelib: Self = serde_json::from_str(json)?;
        typelib.adopt_entries();
        Ok(typelib)
    }

    /// Load a typelib document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| MetadataError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&content)
    }

    /// Save the typelib as pretty-printed JSON.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let io_err = |source| MetadataError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut file = std::fs::File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        writeln!(file).map_err(io_err)?;
        Ok(())
    }

    fn adopt_entries(&mut self) {
        let namespace = self.namespace.clone();
        for info in &mut self.infos {
            info.adopt_namespace(&namespace);
        }
    }
}

/// In-memory repository of typelib documents keyed by namespace.
#[derive(Debug, Default)]
pub struct TypelibRepository {
    typelibs: BTreeMap<String, Typelib>,
}

impl TypelibRepository {
    /// Create an empty repository.
    pub fn new() -> Self { Self::default() }

    /// Add a typelib; a namespace may only be added once.
    pub fn insert(&mut self, typelib: Typelib) -> Result<()> {
        if self.typelibs.contains_key(&typelib.namespace) {
            return Err(MetadataError::DuplicateNamespace(typelib.namespace));
        }
        self.typelibs.insert(typelib.namespace.clone(), typelib);
        Ok(())
    }

    /// Load every given typelib file.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut repo = Self::new();
        for path in paths {
            repo.insert(Typelib::from_file(path.as_ref())?)?;
        }
        Ok(repo)
    }

    /// Loaded namespaces, sorted.
    pub fn namespaces(&self) -> Vec<&str> { self.typelibs.keys().map(String::as_str).collect() }

    /// Typelib of a loaded namespace.
    pub fn typelib(&self, namespace: &str) -> Option<&Typelib> { self.typelibs.get(namespace) }
}

impl Repository for TypelibRepository {
    fn require(&self, namespace: &str) -> Result<()> {
        if self.typelibs.contains_key(namespace) {
            Ok(())
        } else {
            Err(MetadataError::NamespaceNotFound(namespace.to_string()))
        }
    }

    fn count(&self, namespace: &str) -> usize {
        self.typelibs.get(namespace).map(|t| t.infos.len()).unwrap_or(0)
    }

    fn at(&self, namespace: &str, index: usize) -> Option<&InfoNode> {
        self.typelibs.get(namespace).and_then(|t| t.infos.get(index))
    }

    fn c_prefix(&self, namespace: &str) -> Option<String> {
        self.typelibs
            .get(namespace)
            .map(|t| t.c_prefix.clone().unwrap_or_else(|| t.namespace.clone()))
    }

    fn lookup(&self, namespace: &str, name: &str) -> Option<&InfoNode> {
        self.typelibs.get(namespace).and_then(|t| t.infos.iter().find(|i| i.name() == name))
    }
}
