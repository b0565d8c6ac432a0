//! REST API type definitions

use serde::Serialize;
use std::sync::Arc;
use triage_agent::FraudAnalysisService;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FraudAnalysisService>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
