//! Error types for triage core

use thiserror::Error;

/// Alert envelope validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape
    #[error("field has unexpected type: {0}")]
    InvalidField(&'static str),
}
