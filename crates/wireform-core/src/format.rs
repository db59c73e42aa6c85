//! Wire formats supported for response payloads

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// Wire format of a response payload
///
/// Resolved once from caller input; everything downstream matches on the
/// variant exhaustively, so an unsupported format can only surface at the
/// edge that parsed it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    Json,
    Xml,
}

impl PayloadFormat {
    /// MIME type conventionally paired with this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            PayloadFormat::Json => "application/json",
            PayloadFormat::Xml => "application/xml",
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadFormat::Json => write!(f, "json"),
            PayloadFormat::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for PayloadFormat {
    type Err = PayloadError;

    /// Exact, case-sensitive match against the supported set
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::UnsupportedFormat` for anything other than
    /// the literal strings `"json"` and `"xml"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(PayloadFormat::Json),
            "xml" => Ok(PayloadFormat::Xml),
            other => Err(PayloadError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_formats() {
        assert_eq!("json".parse::<PayloadFormat>().unwrap(), PayloadFormat::Json);
        assert_eq!("xml".parse::<PayloadFormat>().unwrap(), PayloadFormat::Xml);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(matches!(
            "JSON".parse::<PayloadFormat>(),
            Err(PayloadError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            "Xml".parse::<PayloadFormat>(),
            Err(PayloadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let err = "yaml".parse::<PayloadFormat>().unwrap_err();
        assert!(matches!(err, PayloadError::UnsupportedFormat(f) if f == "yaml"));
    }

    #[test]
    fn test_display_roundtrip() {
        for format in [PayloadFormat::Json, PayloadFormat::Xml] {
            assert_eq!(format.to_string().parse::<PayloadFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(PayloadFormat::Json.mime_type(), "application/json");
        assert_eq!(PayloadFormat::Xml.mime_type(), "application/xml");
    }

    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&PayloadFormat::Json).unwrap(), "\"json\"");
        assert_eq!(serde_json::to_string(&PayloadFormat::Xml).unwrap(), "\"xml\"");
    }
}
