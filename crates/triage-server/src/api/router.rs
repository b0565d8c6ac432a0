//! Router creation and configuration

use super::handlers::{analyze, health};
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use triage_agent::FraudAnalysisService;

/// Create REST API router
pub fn create_router(service: Arc<FraudAnalysisService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
