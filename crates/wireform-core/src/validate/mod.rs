//! Schema validation dispatch
//!
//! The format tag selects the strategy; an absent or empty schema skips
//! validation entirely. That skip is a deliberate escape hatch for
//! optional contracts, not an error.

mod deref;
mod json;
mod xml;

pub use deref::{dereference, DerefError};

use serde_json::Value;

use crate::error::PayloadError;
use crate::format::PayloadFormat;
use crate::serialize::serialize;

/// Validate content against a schema document appropriate to `format`
///
/// For JSON the content value is validated directly. For XML a string
/// content is taken as the raw document; anything else is serialized to
/// XML first.
///
/// # Errors
///
/// Propagates the strategy's errors unchanged; see [`crate::PayloadError`].
pub fn assert_schema(
    format: PayloadFormat,
    schema: Option<&str>,
    content: &Value,
) -> Result<(), PayloadError> {
    let Some(schema) = schema.filter(|s| !s.trim().is_empty()) else {
        return Ok(());
    };

    match format {
        PayloadFormat::Json => json::validate(schema, content),
        PayloadFormat::Xml => {
            let document = xml_document(content)?;
            xml::validate(schema, &document)
        }
    }
}

fn xml_document(content: &Value) -> Result<String, PayloadError> {
    match content {
        Value::String(document) => Ok(document.clone()),
        other => Ok(serialize(other, PayloadFormat::Xml)?),
    }
}
