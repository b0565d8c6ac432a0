//! Error types for the triage LLM module

use thiserror::Error;

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// LLM module errors
#[derive(Debug, Error)]
pub enum LlmError {
    /// External API call failed
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for LlmError {
    fn from(s: String) -> Self {
        LlmError::Other(s)
    }
}

impl From<&str> for LlmError {
    fn from(s: &str) -> Self {
        LlmError::Other(s.to_string())
    }
}
