//! Fraud decision output model

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three possible verdicts for a reviewed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    /// The transaction appears legitimate and should be processed
    Allow,
    /// The transaction shows clear signs of fraud and should be rejected
    Block,
    /// A human fraud analyst needs to review
    Escalate,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "ALLOW",
            Decision::Block => "BLOCK",
            Decision::Escalate => "ESCALATE",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured fraud verdict extracted from the model's reply.
///
/// Only `decision` is required to deserialize; the model is not
/// contractually bound to emit every field, and absent fields default.
/// Nothing here ties `risk_score` to `decision` mechanically; that
/// mapping is the model's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudDecision {
    pub decision: Decision,

    /// Model confidence in [0, 1]
    #[serde(default)]
    pub confidence: f64,

    /// Free-text explanation of the verdict
    #[serde(default)]
    pub reasoning: String,

    /// Assessed risk in [0, 1]
    #[serde(default)]
    pub risk_score: f64,

    /// Ordered list of the factors that drove the verdict
    #[serde(default)]
    pub key_factors: Vec<String>,

    /// Additional context or suggested follow-up actions
    #[serde(default)]
    pub recommendation: String,
}

/// The complete outcome of analyzing one alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Alert this result belongs to
    pub alert_id: String,

    /// The structured verdict
    pub decision: FraudDecision,

    /// Wall-clock time from request receipt to response assembly
    pub processing_time_ms: u64,

    /// When the result was assembled (RFC 3339)
    pub timestamp: String,

    /// Raw model text, kept for audit
    pub agent_response: String,
}
