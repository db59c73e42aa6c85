//! # Wireform Core
//!
//! Formats an in-memory result value into a wire payload (JSON or XML),
//! attaches transport metadata, and validates the payload against a
//! configured schema before it is allowed to leave the process.
//!
//! This crate provides:
//! - The [`PayloadFormat`] tag and the [`Violation`] error model
//! - A pure serializer for JSON and XML wire bodies
//! - Schema validation for JSON Schema (with `$ref` resolution) and XSD
//! - [`ResponsePayload`], which orchestrates serialize-then-validate and
//!   hands the finished triple to a [`Router`] collaborator
//!
//! ## Example
//!
//! ```rust,ignore
//! use wireform_core::{PayloadFormat, ResponsePayload};
//!
//! let mut payload = ResponsePayload::new(router, PayloadFormat::Json, 200);
//! payload.set_schema(schema_text);
//! payload.set_content(serde_json::json!({"id": 7}))?;
//! let response = payload.finalize(true)?;
//! ```

pub mod error;
pub mod format;
pub mod payload;
pub mod serialize;
pub mod validate;
pub mod violation;

// Re-exports for convenience
pub use error::PayloadError;
pub use format::PayloadFormat;
pub use payload::{ResponsePayload, Router};
pub use serialize::{serialize, SerializeError};
pub use validate::assert_schema;
pub use violation::{Violation, ViolationContext, CODE_INVALID_JSON, CODE_INVALID_XML};
