pub mod mappings;

pub use mappings::{Mappings, MappedClass, MappedField, MappedMethod, MappedParameter, MappedLocal};
