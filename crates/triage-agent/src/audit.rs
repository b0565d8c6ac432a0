//! Result observability hook
//!
//! Exporter integration is an external collaborator, not part of this
//! core's contract; the default sink does nothing.

use tracing::info;
use triage_core::AnalysisResult;

/// Sink for completed analysis results
pub trait AuditSink: Send + Sync {
    fn record(&self, result: &AnalysisResult);
}

/// Default sink: drops everything
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _result: &AnalysisResult) {}
}

/// Sink that emits one structured event per result
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, result: &AnalysisResult) {
        info!(
            target: "triage::audit",
            alert_id = %result.alert_id,
            decision = %result.decision.decision,
            confidence = result.decision.confidence,
            risk_score = result.decision.risk_score,
            processing_time_ms = result.processing_time_ms,
            "analysis result"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{Decision, FraudDecision};

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            alert_id: "alert-001".to_string(),
            decision: FraudDecision {
                decision: Decision::Allow,
                confidence: 0.9,
                reasoning: String::new(),
                risk_score: 0.1,
                key_factors: vec![],
                recommendation: String::new(),
            },
            processing_time_ms: 10,
            timestamp: "2025-01-15T10:30:01.000Z".to_string(),
            agent_response: String::new(),
        }
    }

    #[test]
    fn test_sinks_accept_results() {
        NoopAuditSink.record(&sample_result());
        TracingAuditSink.record(&sample_result());
    }
}
