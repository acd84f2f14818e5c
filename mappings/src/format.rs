//! The external parser/writer seam (spec §6), documented as trait signatures.
//!
//! No concrete text format (SRG, TSRG, Tiny, Proguard, ...) ships in this workspace — that's the
//! "format-specific parsers and writers" spec.md §1 puts out of scope, the same way a concrete
//! classpath loader is left to the embedder (see [`crate::remapper::SuperClassProvider`]'s
//! counterpart in the `remap` crate). These two traits exist so that seam has a real, documented
//! shape: a format crate built against [`MappingsSource`]/[`MappingsSink`] plugs into
//! [`Mappings::new`]/[`Mappings::add_class`](crate::tree::Mappings::add_class) without this crate
//! needing to know anything about line syntax, comments or column layout.

use crate::error::Result;
use crate::tree::Mappings;

/// Parses a mapping document from its line-oriented text representation.
///
/// Implementors read non-blank lines and build a [`Mappings`], returning alongside it a format
/// tag (e.g. `"tiny2"`, `"srg"`) for callers that dispatch on what was actually read. A malformed
/// or unrecognized line is the implementor's own [`MappingsError::UnsupportedFormat`](
/// crate::error::MappingsError::UnsupportedFormat) to raise; this trait only fixes the shape of
/// the seam, not a grammar.
pub trait MappingsSource {
	fn parse<'a>(&self, lines: impl Iterator<Item = &'a str>) -> Result<(Mappings, String)>;
}

/// Serializes a [`Mappings`] back into its line-oriented text representation.
///
/// The returned iterator yields one line per item, in the same order the algebra preserves
/// (spec §5): callers write each line followed by a newline, or join with `\n`.
pub trait MappingsSink {
	fn write(&self, mappings: &Mappings) -> Result<Box<dyn Iterator<Item = String>>>;
}
