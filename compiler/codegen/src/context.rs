//! Per-run generation state.
//!
//! One [`GenerationContext`] is created per generation run and handed to every
//! builder call. It owns the type mapper and memoises namespace prefixes, so
//! nothing about a run lives in process-wide state.

use std::collections::BTreeMap;

use metadata::Repository;
use typemap::TypeMapper;

/// Default bound on parent-chain walks.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 64;

/// State shared by the builders for one run
#[derive(Debug)]
pub struct GenerationContext {
    mapper: TypeMapper,
    max_ancestor_depth: usize,
    prefixes: BTreeMap<String, String>,
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }

    /// Context with the Go mapper and default limits.
    pub fn new() -> Self { Self::builder().build() }

    /// The type mapper.
    pub fn mapper(&self) -> &TypeMapper { &self.mapper }

    /// Most ancestors an object may have before its walk is cut off.
    pub fn max_ancestor_depth(&self) -> usize { self.max_ancestor_depth }

    /// Native identifier prefix of `namespace`.
    ///
    /// Asked of the repository at most once per namespace; a namespace without
    /// a declared prefix uses its own name.
    pub fn c_prefix(&mut self, repo: &dyn Repository, namespace: &str) -> String {
        if let Some(prefix) = self.prefixes.get(namespace) {
            return prefix.clone();
        }
        let prefix = repo.c_prefix(namespace).unwrap_or_else(|| namespace.to_string());
        self.prefixes.insert(namespace.to_string(), prefix.clone());
        prefix
    }

    /// Number of namespaces whose prefix is memoised.
    pub fn cached_prefixes(&self) -> usize { self.prefixes.len() }
}

impl Default for GenerationContext {
    fn default() -> Self { Self::new() }
}

#[derive(Default)]
/// Builder for GenerationContext
pub struct GenerationContextBuilder {
    mapper: Option<TypeMapper>,
    max_ancestor_depth: Option<usize>,
}

impl GenerationContextBuilder {
    /// Set the type mapper
    pub fn mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Set the ancestor walk bound
    pub fn max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = Some(depth);
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> GenerationContext {
        GenerationContext {
            mapper: self.mapper.unwrap_or_default(),
            max_ancestor_depth: self.max_ancestor_depth.unwrap_or(DEFAULT_MAX_ANCESTOR_DEPTH),
            prefixes: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use metadata::{InfoNode, MetadataError};

    use super::*;

    struct CountingRepo {
        asked: Cell<usize>,
    }

    impl Repository for CountingRepo {
        fn require(&self, namespace: &str) -> metadata::Result<()> {
            Err(MetadataError::NamespaceNotFound(namespace.to_string()))
        }
        fn count(&self, _: &str) -> usize { 0 }
        fn at(&self, _: &str, _: usize) -> Option<&InfoNode> { None }
        fn c_prefix(&self, namespace: &str) -> Option<String> {
            self.asked.set(self.asked.get() + 1);
            (namespace == "Gtk").then(|| "Gtk".to_string())
        }
        fn lookup(&self, _: &str, _: &str) -> Option<&InfoNode> { None }
    }

    #[test]
    fn test_prefix_is_memoised() {
        let repo = CountingRepo { asked: Cell::new(0) };
        let mut ctx = GenerationContext::new();
        assert_eq!(ctx.c_prefix(&repo, "Gtk"), "Gtk");
        assert_eq!(ctx.c_prefix(&repo, "Gtk"), "Gtk");
        assert_eq!(repo.asked.get(), 1);

        assert_eq!(ctx.c_prefix(&repo, "Unknown"), "Unknown");
        assert_eq!(ctx.c_prefix(&repo, "Unknown"), "Unknown");
        assert_eq!(repo.asked.get(), 2);
        assert_eq!(ctx.cached_prefixes(), 2);
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = GenerationContext::builder().build();
        assert_eq!(ctx.max_ancestor_depth(), DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(ctx.mapper().adapter().language(), "go");

        let ctx = GenerationContext::builder().max_ancestor_depth(3).build();
        assert_eq!(ctx.max_ancestor_depth(), 3);
    }
}
