//! Target-language side of the type mapping.
//!
//! Each output language implements [`TypeAdapter`] to name its own types. The
//! mapper pairs these names with the fixed native table, so swapping the
//! adapter (together with the renderer's templates) retargets the generator
//! without touching parameter classification.

use metadata::TypeTag;

/// Names target-language types.
pub trait TypeAdapter: Send + Sync {
    /// Language name for logging, e.g. `"go"`.
    fn language(&self) -> &str;

    /// Target type for a basic tag; `None` when the language cannot represent it.
    fn map_tag_to_target(&self, tag: TypeTag) -> Option<&'static str>;

    /// Target type standing in for an opaque handle.
    fn opaque_handle(&self) -> &'static str;

    /// Target type of the synthetic error output of throwing callables.
    fn error_type(&self) -> &'static str;
}
