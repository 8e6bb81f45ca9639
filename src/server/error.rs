//! Service error type and its HTTP mapping.
//!
//! Exactly two externally visible failure shapes exist: a 400 for a
//! missing/invalid upload, checked before any pipeline work, and a 500 with
//! one fixed generic message for anything the pipeline throws. Internal
//! detail is logged server-side and never leaves the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message returned for a missing or invalid upload.
pub const UPLOAD_ERROR_MESSAGE: &str = "Upload a valid .docx file.";

/// The one generic message any pipeline failure surfaces as.
pub const PIPELINE_ERROR_MESSAGE: &str = "Formatting failed. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The `file` field is absent, not a file, or not a .docx.
    #[error("{UPLOAD_ERROR_MESSAGE}")]
    InvalidUpload,

    /// Any stage of the pipeline failed; the string is internal detail only.
    #[error("pipeline failure: {0}")]
    Pipeline(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidUpload => (StatusCode::BAD_REQUEST, UPLOAD_ERROR_MESSAGE),
            Self::Pipeline(ref detail) => {
                tracing::error!("pipeline failure: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, PIPELINE_ERROR_MESSAGE)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
