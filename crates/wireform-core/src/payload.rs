//! Response payload orchestration
//!
//! [`ResponsePayload`] aggregates content, format, schema, status code and
//! header metadata, and enforces the serialize-then-validate discipline:
//! content is re-validated synchronously on every assignment, so content
//! and its validity are never observably out of sync. The only seam to
//! the transport layer is the [`Router`] collaborator handed the final
//! `(body, status, headers)` triple.

use serde_json::Value;

use crate::error::PayloadError;
use crate::format::PayloadFormat;
use crate::serialize::{serialize, SerializeError};
use crate::validate;

/// Transport seam: turns a formatted body plus metadata into a wire response
///
/// The core makes no assumption about how the collaborator sends bytes;
/// `build_response` receives the triple verbatim and its result is
/// returned to the caller unchanged.
pub trait Router {
    type Response;

    fn build_response(
        &self,
        body: String,
        status: u16,
        headers: &[(String, String)],
    ) -> Self::Response;
}

/// A response payload under construction
///
/// Constructed with its router, format and status code; schema and content
/// are set afterwards, any number of times. Setting content validates it
/// against the configured schema before committing, and a finalized
/// instance may be reused by setting new content.
#[derive(Debug, Clone)]
pub struct ResponsePayload<R> {
    router: R,
    format: PayloadFormat,
    status: u16,
    schema: Option<String>,
    content: Option<Value>,
    content_type: Option<String>,
    location: Option<String>,
}

impl<R: Router> ResponsePayload<R> {
    pub fn new(router: R, format: PayloadFormat, status: u16) -> Self {
        Self {
            router,
            format,
            status,
            schema: None,
            content: None,
            content_type: None,
            location: None,
        }
    }

    pub fn format(&self) -> PayloadFormat {
        self.format
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Content committed by the last successful `set_content`
    pub fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    /// Switch to another supported format
    ///
    /// Unsupported format strings cannot reach this method; they fail at
    /// `PayloadFormat::from_str`. Previously committed content is kept and
    /// re-validated on the next `set_content`.
    pub fn set_format(&mut self, format: PayloadFormat) {
        self.format = format;
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Configure the schema; an empty document disables validation
    pub fn set_schema(&mut self, schema: impl Into<String>) {
        let schema = schema.into();
        self.schema = if schema.trim().is_empty() {
            None
        } else {
            Some(schema)
        };
    }

    pub fn clear_schema(&mut self) {
        self.schema = None;
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Store content, validating it first against the configured format
    /// and schema
    ///
    /// # Errors
    ///
    /// Propagates any validation error; on failure the content is not
    /// committed and the payload must not be finalized.
    pub fn set_content(&mut self, content: Value) -> Result<(), PayloadError> {
        self.assert_schema(&content)?;
        self.content = Some(content);
        Ok(())
    }

    /// Validate a value against the currently configured format and schema
    ///
    /// No-op when no schema is configured. Does not touch payload state,
    /// and identical arguments produce identical results.
    pub fn assert_schema(&self, value: &Value) -> Result<(), PayloadError> {
        validate::assert_schema(self.format, self.schema.as_deref(), value)
    }

    /// Headers derived from configured metadata
    ///
    /// Deterministic order: `Content-Type` first, then `Location`; empty
    /// values are omitted entirely.
    pub fn configured_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(2);
        if let Some(content_type) = non_empty(self.content_type.as_deref()) {
            headers.push(("Content-Type".to_string(), content_type));
        }
        if let Some(location) = non_empty(self.location.as_deref()) {
            headers.push(("Location".to_string(), location));
        }
        headers
    }

    /// Serialize the content and delegate the final triple to the router
    ///
    /// With `auto_serialize` the content is run through the serializer;
    /// without it the content must already be a wire-form string. Unset
    /// content serializes as JSON `null` / an empty XML payload.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::Serialize` when encoding fails or when
    /// `auto_serialize` is off and the content is not a string.
    pub fn finalize(&self, auto_serialize: bool) -> Result<R::Response, PayloadError> {
        let content = self.content.clone().unwrap_or(Value::Null);

        let body = if auto_serialize {
            serialize(&content, self.format)?
        } else {
            match content {
                Value::String(body) => body,
                _ => return Err(SerializeError::NotPrerendered.into()),
            }
        };

        tracing::debug!(
            format = %self.format,
            status = self.status,
            bytes = body.len(),
            "finalizing response payload"
        );
        Ok(self
            .router
            .build_response(body, self.status, &self.configured_headers()))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
