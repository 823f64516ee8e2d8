//! # Error Types
//!
//! Errors raised while translating free-form catalog values into the closed
//! protocol vocabulary.

use thiserror::Error;

/// A service type tag read from the catalog that has no protocol counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown service type tag: {tag}")]
pub struct UnknownServiceKind {
    /// The tag exactly as it was stored.
    pub tag: String,
}
