//! Error kinds raised by the mappings model, its algebra and its remapper.
//!
//! Invariant violations and arity mismatches are programming errors: they fail fast at the call
//! boundary rather than being recovered from. Parse errors inside mixin-annotation string values
//! (handled in the `remap` crate) are soft and never reach this enum; they're logged and the
//! original string passes through unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingsError {
	#[error("namespace {name:?} not found, only got {available:?}")]
	NamespaceNotFound {
		name: String,
		available: Vec<String>,
	},

	#[error("arity mismatch: {what} has {expected} namespaces, got {got}")]
	ArityMismatch {
		what: &'static str,
		expected: usize,
		got: usize,
	},

	#[error("join over intermediate namespace {intermediate:?} is missing {side} entity {name:?}")]
	JoinMissingEntity {
		intermediate: String,
		side: &'static str,
		name: String,
	},

	#[error("descriptor error: {0}")]
	Descriptor(#[from] duke::descriptor_ops::DescriptorError),

	#[error("invalid name or descriptor: {0}")]
	InvalidName(#[from] anyhow::Error),

	#[error("unsupported mapping format: {0}")]
	UnsupportedFormat(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MappingsError>;
