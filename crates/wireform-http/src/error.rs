//! HTTP error mapping for payload failures

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use wireform_core::{PayloadError, Violation};

/// HTTP-facing errors for the payload pipeline
#[derive(Debug, Error)]
pub enum WireformHttpError {
    #[error("failed to parse request: {0}")]
    ParseError(String),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl IntoResponse for WireformHttpError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            WireformHttpError::ParseError(_) => (StatusCode::BAD_REQUEST, "PARSE_ERROR"),
            WireformHttpError::Payload(err) => match err {
                // Misconfiguration of the payload itself
                PayloadError::UnsupportedFormat(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "UNSUPPORTED_FORMAT")
                }
                PayloadError::InvalidSchemaDocument { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_SCHEMA_DOCUMENT")
                }
                PayloadError::Serialize(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZE_ERROR")
                }
                // The produced payload failed its contract
                PayloadError::InvalidXmlDocument { .. } => {
                    (StatusCode::BAD_GATEWAY, "INVALID_XML_DOCUMENT")
                }
                PayloadError::SchemaViolation { .. } => {
                    (StatusCode::BAD_GATEWAY, "SCHEMA_VIOLATION")
                }
            },
        };

        let violations = match &self {
            WireformHttpError::Payload(err) => err.violations().to_vec(),
            WireformHttpError::ParseError(_) => vec![],
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            violations,
        };

        (status, Json(body)).into_response()
    }
}
