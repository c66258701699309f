//! Named snippets and placeholder substitution.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use codegen::RenderError;
use regex::Regex;
use tracing::debug;

use crate::fields::Fields;
use crate::{Result, TemplateError};

/// File extension of snippet files.
pub const SNIPPET_EXTENSION: &str = "tmpl";

/// Snippets a template set must provide.
pub const REQUIRED_SNIPPETS: [&str; 11] = [
    "enum",
    "enum-value",
    "object-definition",
    "interface-definition",
    "object-implement",
    "go-function",
    "go-function-wrapper",
    "c-marshal",
    "c-decl",
    "go-marshal",
    "go-error",
];

const BUILTIN_SNIPPETS: [(&str, &str); 11] = [
    ("enum", include_str!("../snippets/enum.tmpl")),
    ("enum-value", include_str!("../snippets/enum-value.tmpl")),
    ("object-definition", include_str!("../snippets/object-definition.tmpl")),
    ("interface-definition", include_str!("../snippets/interface-definition.tmpl")),
    ("object-implement", include_str!("../snippets/object-implement.tmpl")),
    ("go-function", include_str!("../snippets/go-function.tmpl")),
    ("go-function-wrapper", include_str!("../snippets/go-function-wrapper.tmpl")),
    ("c-marshal", include_str!("../snippets/c-marshal.tmpl")),
    ("c-decl", include_str!("../snippets/c-decl.tmpl")),
    ("go-marshal", include_str!("../snippets/go-marshal.tmpl")),
    ("go-error", include_str!("../snippets/go-error.tmpl")),
];

const PLACEHOLDER: &str = r"\{\{\s*([A-Za-z][A-Za-z0-9]*)\s*\}\}";

/// A set of named snippets.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    snippets: BTreeMap<String, String>,
    placeholder: Regex,
}

impl TemplateSet {
    /// The embedded Go snippets.
    pub fn builtin() -> Result<Self> {
        let snippets =
            BUILTIN_SNIPPETS.iter().map(|(n, s)| (n.to_string(), s.to_string())).collect();
        Self::with_snippets(snippets)
    }

    /// Load every `*.tmpl` file in `dir`, keyed by file stem.
    ///
    /// Fails when any of [`REQUIRED_SNIPPETS`] is missing. Extra snippets are
    /// kept and can be rendered by name.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| TemplateError::Io { path, source }
        };
        let mut snippets = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNIPPET_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let body = fs::read_to_string(&path).map_err(io_err(&path))?;
            snippets.insert(name.to_string(), body);
        }
        if let Some(name) = REQUIRED_SNIPPETS.into_iter().find(|n| !snippets.contains_key(*n)) {
            return Err(TemplateError::MissingSnippet { dir: dir.to_path_buf(), name });
        }
        debug!(dir = %dir.display(), snippets = snippets.len(), "loaded templates");
        Self::with_snippets(snippets)
    }

    fn with_snippets(snippets: BTreeMap<String, String>) -> Result<Self> {
        Ok(Self { snippets, placeholder: Regex::new(PLACEHOLDER)? })
    }

    /// Snippet text by name.
    pub fn get(&self, name: &str) -> Option<&str> { self.snippets.get(name).map(String::as_str) }

    /// Snippet names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> { self.snippets.keys().map(String::as_str) }

    /// Placeholder names used by a snippet, in order of first use.
    pub fn placeholders(&self, name: &str) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        for caps in self.get(name).into_iter().flat_map(|s| self.placeholder.captures_iter(s)) {
            if let Some(field) = caps.get(1).map(|m| m.as_str()) {
                if !found.contains(&field) {
                    found.push(field);
                }
            }
        }
        found
    }

    /// Render snippet `name`, substituting every placeholder from `fields`.
    pub fn render(&self, name: &str, fields: &Fields) -> std::result::Result<String, RenderError> {
        let snippet = self.get(name).ok_or_else(|| RenderError::MissingTemplate(name.to_string()))?;
        if let Some(field) = self.placeholders(name).into_iter().find(|f| !fields.contains_key(*f)) {
            return Err(RenderError::UnknownField {
                template: name.to_string(),
                field: field.to_string(),
            });
        }
        let rendered = self.placeholder.replace_all(snippet, |caps: &regex::Captures<'_>| {
            fields.get(&caps[1]).cloned().unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }
}
