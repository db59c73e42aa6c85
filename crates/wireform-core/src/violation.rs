//! Uniform violation model
//!
//! Both schema engines report failures in structurally different shapes;
//! every failure is normalized into a [`Violation`] before it reaches a
//! caller, so diagnostics look the same regardless of the wire format.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Machine code attached to every XML-side failure
pub const CODE_INVALID_XML: &str = "invalid-response-xml";

/// Machine code for an unparseable JSON schema document
pub const CODE_INVALID_JSON: &str = "invalid-response-payloadbody-json";

/// A single validation or serialization failure
///
/// `message` and `code` are always non-empty. `context` is format-specific:
/// JSON violations carry a pointer into the payload, the offending value,
/// and the violated constraints; XML violations carry none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    pub message: String,
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ViolationContext>,
}

/// Structured context attached to JSON violations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViolationContext {
    /// JSON Pointer into the payload (e.g. `/items/0/name`)
    pub json_pointer: String,

    /// The offending value, when the pointer resolves; `None` otherwise
    pub value: Option<Value>,

    /// The constraints the value violated
    pub constraints: serde_json::Map<String, Value>,
}

impl Violation {
    /// Build a violation without structured context (the XML shape)
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        debug_assert!(!code.is_empty() && !message.is_empty());
        Self {
            message,
            code,
            context: None,
        }
    }

    /// Build a violation carrying pointer/value/constraints context (the JSON shape)
    pub fn with_context(
        code: impl Into<String>,
        message: impl Into<String>,
        context: ViolationContext,
    ) -> Self {
        Self {
            context: Some(context),
            ..Self::new(code, message)
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)
    }
}
