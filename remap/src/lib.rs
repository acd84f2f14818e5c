//! Applies a [`mappings::remapper`] to parsed `duke` class files: tree rewriting (component F),
//! generic signature remapping, inheritance-aware super class lookups and mixin annotation
//! rewriting (component G).

pub mod rewrite;
pub mod signature;
pub mod inheritance;
pub mod mixin;

pub use rewrite::{TreeRemapper, widen_access, remap_class};
pub use inheritance::{ClassLoader, MapClassLoader, ClassLoaderSuperClassProvider};
pub use mixin::rewrite_mixin_annotations;
