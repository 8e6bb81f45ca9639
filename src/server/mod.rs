//! The docsmith web service (feature = `server`).
//!
//! One formatting endpoint plus a health probe. Each request is processed
//! independently and synchronously — no queue, no shared mutable state —
//! so the router carries no application state at all.

pub mod error;
pub mod handler;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

/// Uploads above this size are rejected by the extractor before the
/// handler runs.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/api/format", post(handler::format))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
