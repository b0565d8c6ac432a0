//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::{AppState, HealthResponse};
use crate::error::ApiError;
use axum::{extract::State, Json};
use tracing::info;
use triage_core::AnalysisResult;

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Analyze endpoint: one alert in, one analysis result out
#[axum::debug_handler]
pub(super) async fn analyze(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<serde_json::Value>,
) -> Result<Json<AnalysisResult>, ApiError> {
    info!("Received analyze request");

    let result = state.service.analyze(payload).await?;

    Ok(Json(result))
}
