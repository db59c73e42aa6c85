//! Error taxonomy for payload formatting and validation
//!
//! Configuration errors (bad format, malformed schema document) are kept
//! distinct from validation failures of the content itself. No error is
//! swallowed or retried internally; content never reaches the transport
//! layer while any validation error exists.

use thiserror::Error;

use crate::serialize::SerializeError;
use crate::violation::Violation;

/// Errors raised while formatting or validating a response payload
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PayloadError {
    /// Format outside the supported set; a configuration error surfaced
    /// immediately at the call that supplied it
    #[error("unsupported payload format '{0}' (expected 'json' or 'xml')")]
    UnsupportedFormat(String),

    /// The schema document itself is malformed; distinct from a validation
    /// failure of the content
    #[error("invalid schema document: {}", summary(.violations))]
    InvalidSchemaDocument { violations: Vec<Violation> },

    /// The content claims to be XML but does not parse
    #[error("invalid xml document: {}", summary(.violations))]
    InvalidXmlDocument { violations: Vec<Violation> },

    /// Content parsed fine but fails schema constraints; the primary
    /// expected failure mode, always carries one-or-more violations
    #[error("response payload violates schema: {}", summary(.violations))]
    SchemaViolation { violations: Vec<Violation> },

    /// Encoder-level serialization failure
    #[error("serialization failed: {0}")]
    Serialize(#[from] SerializeError),
}

impl PayloadError {
    /// The violations carried by this error, empty for variants without any
    pub fn violations(&self) -> &[Violation] {
        match self {
            PayloadError::InvalidSchemaDocument { violations }
            | PayloadError::InvalidXmlDocument { violations }
            | PayloadError::SchemaViolation { violations } => violations,
            PayloadError::UnsupportedFormat(_) | PayloadError::Serialize(_) => &[],
        }
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
