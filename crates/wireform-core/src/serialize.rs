//! Payload serialization
//!
//! Pure transformation from a content value to its wire representation.
//! JSON bodies come straight from `serde_json`, which leaves forward
//! slashes and non-ASCII characters unescaped. XML bodies are produced by
//! round-tripping the content through JSON — flattening any exotic
//! structure into plain maps and sequences — and feeding the result to a
//! generic element-per-field encoder.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use thiserror::Error;

use crate::format::PayloadFormat;

/// Root element wrapping generic XML payloads
const XML_ROOT: &str = "response";

/// Element name used for sequence entries
const XML_ITEM: &str = "item";

/// Errors raised by the wire encoders
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("json encoding failed: {0}")]
    Json(String),

    #[error("xml encoding failed: {0}")]
    Xml(String),

    #[error("content must be a pre-rendered string when auto-serialization is disabled")]
    NotPrerendered,
}

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        SerializeError::Json(err.to_string())
    }
}

impl From<quick_xml::Error> for SerializeError {
    fn from(err: quick_xml::Error) -> Self {
        SerializeError::Xml(err.to_string())
    }
}

impl From<std::io::Error> for SerializeError {
    fn from(err: std::io::Error) -> Self {
        SerializeError::Xml(err.to_string())
    }
}

/// Serialize a content value into its wire representation
///
/// # Errors
///
/// Returns `SerializeError` when the underlying encoder fails. Unsupported
/// formats cannot reach this function: [`PayloadFormat`] is parsed at the
/// caller's edge.
pub fn serialize(content: &Value, format: PayloadFormat) -> Result<String, SerializeError> {
    match format {
        PayloadFormat::Json => to_json(content),
        PayloadFormat::Xml => to_xml(content),
    }
}

fn to_json(content: &Value) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(content)?)
}

fn to_xml(content: &Value) -> Result<String, SerializeError> {
    // A plain string is already wire-form markup; re-encoding it through
    // the element writer would entity-escape the document.
    if let Value::String(s) = content {
        return Ok(s.clone());
    }

    // JSON round trip normalizes the content into plain maps/sequences.
    let encoded = serde_json::to_string(content)?;
    let generic: Value = serde_json::from_str(&encoded)?;

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, XML_ROOT, &generic)?;

    String::from_utf8(writer.into_inner()).map_err(|e| SerializeError::Xml(e.to_string()))
}

/// Generic element-per-field encoder over a JSON value tree
fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), SerializeError> {
    match value {
        Value::Null => {
            writer.write_event(Event::Empty(BytesStart::new(name)))?;
        }
        Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for (key, child) in map {
                write_element(writer, key, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Value::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_element(writer, XML_ITEM, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        scalar => {
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            writer.write_event(Event::Text(BytesText::new(&text)))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_leaves_slashes_unescaped() {
        let out = serialize(&json!({"path": "/tmp/file"}), PayloadFormat::Json).unwrap();
        assert!(out.contains("/tmp/file"));
        assert!(!out.contains("\\/"));
    }

    #[test]
    fn test_json_leaves_non_ascii_unescaped() {
        let out = serialize(&json!({"greeting": "héllo wörld"}), PayloadFormat::Json).unwrap();
        assert!(out.contains("héllo wörld"));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn test_json_roundtrip_reproduces_structure() {
        let value = json!({"a": [1, 2, {"b": null}], "c": "x/y"});
        let out = serialize(&value, PayloadFormat::Json).unwrap();
        let back: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_xml_object_encoding() {
        let out = serialize(&json!({"id": 7, "name": "ok"}), PayloadFormat::Xml).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("<response>"));
        assert!(out.contains("<id>7</id>"));
        assert!(out.contains("<name>ok</name>"));
        assert!(out.ends_with("</response>"));
    }

    #[test]
    fn test_xml_array_entries_become_items() {
        let out = serialize(&json!({"tags": ["a", "b"]}), PayloadFormat::Xml).unwrap();
        assert!(out.contains("<tags><item>a</item><item>b</item></tags>"));
    }

    #[test]
    fn test_xml_null_becomes_empty_element() {
        let out = serialize(&json!({"gone": null}), PayloadFormat::Xml).unwrap();
        assert!(out.contains("<gone/>"));
    }

    #[test]
    fn test_xml_text_is_escaped() {
        let out = serialize(&json!({"note": "a < b & c"}), PayloadFormat::Xml).unwrap();
        assert!(out.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_xml_string_content_passes_through_verbatim() {
        let markup = "<other/>";
        let out = serialize(&json!(markup), PayloadFormat::Xml).unwrap();
        assert_eq!(out, markup);
    }
}
