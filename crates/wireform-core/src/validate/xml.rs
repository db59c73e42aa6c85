//! XML Schema (XSD) validation strategy
//!
//! Backed by libxml2. Well-formedness is checked first: an unparseable
//! document never reaches schema validation. Every validation constructs
//! fresh parser and schema contexts, and a process-wide mutex serializes
//! entry into the engine — libxml2 keeps error state in library-global
//! structures, so one validation at a time may run, and nothing survives
//! a call on any exit path.

use std::sync::Mutex;

use libxml::error::StructuredError;
use libxml::parser::Parser;
use libxml::schemas::{SchemaParserContext, SchemaValidationContext};
use once_cell::sync::Lazy;

use crate::error::PayloadError;
use crate::violation::{Violation, CODE_INVALID_XML};

static ENGINE: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Validate an XML document string against an XSD document
///
/// # Errors
///
/// - `PayloadError::InvalidXmlDocument` when the value is not well-formed
///   XML (schema validation is not attempted).
/// - `PayloadError::InvalidSchemaDocument` when the XSD itself does not
///   compile.
/// - `PayloadError::SchemaViolation` with one violation per engine error,
///   each carrying the engine message and line number.
pub fn validate(schema_text: &str, document: &str) -> Result<(), PayloadError> {
    let _engine = ENGINE.lock().unwrap();

    let parsed = Parser::default().parse_string(document).map_err(|err| {
        PayloadError::InvalidXmlDocument {
            violations: vec![Violation::new(
                CODE_INVALID_XML,
                format!("xml document could not be parsed: {err}"),
            )],
        }
    })?;

    let mut schema_parser = SchemaParserContext::from_buffer(schema_text);
    let mut schema =
        SchemaValidationContext::from_parser(&mut schema_parser).map_err(|errors| {
            PayloadError::InvalidSchemaDocument {
                violations: violations_from(&errors),
            }
        })?;

    match schema.validate_document(&parsed) {
        Ok(()) => Ok(()),
        Err(errors) => {
            let violations = violations_from(&errors);
            if violations.is_empty() {
                // Engine flagged the document without a single diagnostic;
                // tolerated, but worth surfacing in telemetry.
                tracing::warn!("xml schema engine reported failure without diagnostics");
                return Ok(());
            }
            Err(PayloadError::SchemaViolation { violations })
        }
    }
}

fn violations_from(errors: &[StructuredError]) -> Vec<Violation> {
    errors
        .iter()
        .map(|err| {
            let message = err
                .message
                .as_deref()
                .unwrap_or("unknown xml error")
                .trim()
                .to_string();
            let message = match err.line {
                Some(line) => format!("{message} (line: {line})"),
                None => message,
            };
            Violation::new(CODE_INVALID_XML, message)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_XSD: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="root">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="id" type="xs:integer"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;

    #[test]
    fn test_conforming_document_passes() {
        let document = "<root><id>42</id></root>";
        assert!(validate(ROOT_XSD, document).is_ok());
    }

    #[test]
    fn test_wrong_root_element_is_a_schema_violation() {
        let err = validate(ROOT_XSD, "<other/>").unwrap_err();

        let PayloadError::SchemaViolation { violations } = err else {
            panic!("expected SchemaViolation, got: {err}");
        };
        assert!(!violations.is_empty());
        assert!(violations.iter().all(|v| v.code == CODE_INVALID_XML));
        assert!(violations.iter().all(|v| v.context.is_none()));
    }

    #[test]
    fn test_malformed_document_short_circuits() {
        // Never reaches schema validation, so only the parse error is
        // reported even though the document also violates the schema.
        let err = validate(ROOT_XSD, "<root><id>banana</root>").unwrap_err();
        assert!(
            matches!(err, PayloadError::InvalidXmlDocument { .. }),
            "expected InvalidXmlDocument, got: {err}"
        );
    }

    #[test]
    fn test_malformed_schema_document() {
        let err = validate("<xs:schema", "<root/>").unwrap_err();
        assert!(matches!(err, PayloadError::InvalidSchemaDocument { .. }));
    }

    #[test]
    fn test_schema_violation_messages_carry_line_numbers() {
        let document = "<root>\n  <id>not-a-number</id>\n</root>";
        let err = validate(ROOT_XSD, document).unwrap_err();
        assert!(
            err.violations().iter().any(|v| v.message.contains("(line:")),
            "got: {:?}",
            err.violations()
        );
    }

    #[test]
    fn test_consecutive_validations_are_independent() {
        // A failing validation leaves no engine state behind that changes
        // the outcome of the next call.
        let bad = "<other/>";
        let good = "<root><id>1</id></root>";

        assert!(validate(ROOT_XSD, bad).is_err());
        assert!(validate(ROOT_XSD, good).is_ok());
        let first = validate(ROOT_XSD, bad).unwrap_err();
        let second = validate(ROOT_XSD, bad).unwrap_err();
        assert_eq!(first.violations(), second.violations());
    }
}
