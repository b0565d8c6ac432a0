//! Server error types
//!
//! Callers only ever see the two structured error shapes: 400 with an
//! `error` field, or 500 with `error` and `details`. Raw parse errors
//! and transport stack traces never leak through.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use triage_agent::AnalysisError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete request
    #[error("{0}")]
    InvalidRequest(String),

    /// Unexpected server-side failure
    #[error("{message}: {details}")]
    Internal { message: String, details: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "details": details })),
            )
                .into_response(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidAlert(_) => ApiError::InvalidRequest(err.to_string()),
            AnalysisError::ModelCall(inner) => ApiError::Internal {
                message: "Failed to analyze transaction".to_string(),
                details: inner.to_string(),
            },
        }
    }
}
