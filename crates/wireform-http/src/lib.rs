//! # Wireform HTTP Transport
//!
//! Axum binding for Wireform response payloads.
//!
//! This crate provides:
//! - [`AxumRouter`], the [`wireform_core::Router`] implementation that
//!   turns the finalized `(body, status, headers)` triple into an
//!   `axum::response::Response`
//! - Error mapping from [`wireform_core::PayloadError`] to HTTP status
//!   codes with a JSON error body
//!
//! ## Example
//!
//! ```ignore
//! use wireform_core::{PayloadFormat, ResponsePayload};
//! use wireform_http::AxumRouter;
//!
//! let mut payload = ResponsePayload::new(AxumRouter, PayloadFormat::Json, 200);
//! payload.set_content_type("application/json");
//! payload.set_content(serde_json::json!({"id": 7}))?;
//! let response = payload.finalize(true)?; // axum::response::Response
//! ```

mod error;
mod router;

pub use error::{ErrorResponse, WireformHttpError};
pub use router::AxumRouter;
