//! Wireform request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;
use wireform_core::{PayloadFormat, ResponsePayload};
use wireform_http::{AxumRouter, WireformHttpError};

/// Server-wide payload configuration
pub struct AppState {
    pub format: PayloadFormat,
    pub schema: Option<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    format: String,
    schema_configured: bool,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        format: state.format.to_string(),
        schema_configured: state.schema.is_some(),
    })
}

/// Main respond endpoint - envelopes the incoming value and runs it
/// through the serialize-then-validate pipeline
pub async fn respond(
    State(state): State<Arc<AppState>>,
    Json(result): Json<Value>,
) -> Result<Response, WireformHttpError> {
    let request_id = Uuid::new_v4();

    tracing::info!(
        request_id = %request_id,
        format = %state.format,
        "Processing respond request"
    );

    let content = json!({
        "request_id": request_id,
        "received_at": Utc::now(),
        "result": result,
    });

    let mut payload = ResponsePayload::new(AxumRouter, state.format, 200);
    payload.set_content_type(state.format.mime_type());
    if let Some(schema) = &state.schema {
        payload.set_schema(schema.clone());
    }

    // Validation failures propagate here and surface as structured
    // HTTP errors; invalid content never leaves the process.
    payload.set_content(content)?;

    Ok(payload.finalize(true)?)
}
