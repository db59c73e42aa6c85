//! Wireform Test Server
//!
//! A local server that runs incoming values through the full
//! serialize-then-validate pipeline and returns the finalized payload.
//!
//! Usage:
//!   # No schema (validation skipped)
//!   cargo run --package wireform-server
//!
//!   # Validate every response against a schema document
//!   WIREFORM_SCHEMA=contract.schema.json cargo run --package wireform-server
//!
//!   # Serve XML payloads
//!   WIREFORM_FORMAT=xml cargo run --package wireform-server

mod handlers;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wireform_core::PayloadFormat;

use handlers::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wireform_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let format = match std::env::var("WIREFORM_FORMAT") {
        Ok(raw) => match PayloadFormat::from_str(&raw) {
            Ok(format) => format,
            Err(err) => {
                tracing::error!("{err}");
                std::process::exit(1);
            }
        },
        Err(_) => PayloadFormat::Json,
    };

    let schema = match std::env::var("WIREFORM_SCHEMA") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::info!("Validating responses against schema at {path}");
                Some(text)
            }
            Err(err) => {
                tracing::error!("Failed to read schema at {path}: {err}");
                std::process::exit(1);
            }
        },
        Err(_) => {
            tracing::info!("No schema configured - validation is skipped");
            None
        }
    };

    let state = Arc::new(AppState { format, schema });

    // Build router
    let app = Router::new()
        .route("/v1/respond", post(handlers::respond))
        .route("/v1/health", get(handlers::health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    tracing::info!("Wireform server listening on http://{} ({})", addr, format);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
