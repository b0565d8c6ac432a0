//! Agent error types

use thiserror::Error;
use triage_llm::LlmError;

/// Errors the analysis service can surface to its caller.
///
/// The taxonomy is deliberately small: a client sent something
/// unprocessable, or the upstream model call failed. Response
/// interpretation problems never appear here - the parser absorbs them -
/// and notification failures are reported inside their own outcome.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed or incomplete alert; no model call was made
    #[error("Invalid transaction data: {0}")]
    InvalidAlert(String),

    /// The external model call itself failed
    #[error("Fraud analysis failed: {0}")]
    ModelCall(#[from] LlmError),
}
