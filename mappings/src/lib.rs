//! A multi-namespace symbol table for JVM class files, an algebra over it, and an
//! inheritance-aware remapper built on top.

pub mod tree;
pub mod algebra;
pub mod remapper;
pub mod error;
pub mod format;

pub use error::{MappingsError, Result};
pub use tree::{Mappings, MappedClass, MappedField, MappedMethod, MappedParameter, MappedLocal};
pub use format::{MappingsSource, MappingsSink};
