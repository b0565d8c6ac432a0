//! Decision parsing
//!
//! The model is not contractually bound to emit well-formed JSON, so this
//! parser is total: it always produces *some* decision, and every
//! degraded path biases toward ESCALATE rather than ALLOW or BLOCK. A
//! wrong automatic allow/block is costlier than a delayed human review.

use regex::Regex;
use tracing::warn;
use triage_core::{Decision, FraudDecision};

/// Parse the model's raw text into a structured decision.
///
/// Priority order:
/// 1. The greedy first-`{`-to-last-`}` substring, deserialized as a
///    decision object. This can misfire on text containing multiple
///    JSON-like fragments; that behavior is pinned by tests rather than
///    fixed.
/// 2. If that span exists but does not deserialize, an ESCALATE verdict
///    flagging the parse failure.
/// 3. If there is no brace pair at all, a keyword scan of the lower-cased
///    text synthesizing a conservative verdict.
pub fn parse_decision(raw: &str) -> FraudDecision {
    let brace_span = Regex::new(r"(?s)\{.*\}").unwrap();

    if let Some(span) = brace_span.find(raw) {
        match serde_json::from_str::<FraudDecision>(span.as_str()) {
            Ok(decision) => return decision,
            Err(err) => {
                warn!(error = %err, "failed to parse model decision JSON");
                return FraudDecision {
                    decision: Decision::Escalate,
                    confidence: 0.5,
                    reasoning: raw.to_string(),
                    risk_score: 0.6,
                    key_factors: vec!["Unable to parse response".to_string()],
                    recommendation: "Escalate due to parsing error".to_string(),
                };
            }
        }
    }

    let text = raw.to_lowercase();
    if text.contains("decision") && text.contains("allow") {
        FraudDecision {
            decision: Decision::Allow,
            confidence: 0.7,
            reasoning: raw.to_string(),
            risk_score: 0.3,
            key_factors: vec!["Agent analysis".to_string()],
            recommendation: "Process transaction".to_string(),
        }
    } else if text.contains("decision") && text.contains("block") {
        FraudDecision {
            decision: Decision::Block,
            confidence: 0.8,
            reasoning: raw.to_string(),
            risk_score: 0.8,
            key_factors: vec!["Agent analysis".to_string()],
            recommendation: "Block transaction".to_string(),
        }
    } else {
        FraudDecision {
            decision: Decision::Escalate,
            confidence: 0.5,
            reasoning: raw.to_string(),
            risk_score: 0.6,
            key_factors: vec!["Agent analysis".to_string()],
            recommendation: "Escalate for human review".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_json_used_verbatim() {
        let raw = r#"{"decision": "ALLOW", "confidence": 0.92, "reasoning": "clean profile", "risk_score": 0.1, "key_factors": ["verified KYC"], "recommendation": "process"}"#;

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Allow);
        assert!((decision.confidence - 0.92).abs() < f64::EPSILON);
        assert_eq!(decision.reasoning, "clean profile");
        assert_eq!(decision.key_factors, vec!["verified KYC"]);
    }

    #[test]
    fn test_json_embedded_in_prose_is_extracted() {
        let raw = "After reviewing the signals, here is my verdict:\n\
                   {\"decision\": \"BLOCK\", \"confidence\": 0.88, \"risk_score\": 0.9}\n\
                   Let me know if you need more detail.";

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Block);
        assert!((decision.confidence - 0.88).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_json_inside_braces_escalates() {
        let raw = "Here you go: {\"decision\": \"ALLOW\", \"confidence\": }";

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Escalate);
        assert!((decision.confidence - 0.5).abs() < f64::EPSILON);
        assert!((decision.risk_score - 0.6).abs() < f64::EPSILON);
        assert_eq!(decision.key_factors, vec!["Unable to parse response"]);
        assert_eq!(decision.reasoning, raw);
    }

    #[test]
    fn test_json_without_decision_field_escalates() {
        let raw = r#"{"confidence": 0.9, "risk_score": 0.1}"#;

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Escalate);
        assert_eq!(decision.key_factors, vec!["Unable to parse response"]);
    }

    #[test]
    fn test_keyword_fallback_allow() {
        let raw = "My decision is to allow this transaction; the profile looks clean.";

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Allow);
        assert!((decision.confidence - 0.7).abs() < f64::EPSILON);
        assert!((decision.risk_score - 0.3).abs() < f64::EPSILON);
        assert_eq!(decision.reasoning, raw);
        assert_eq!(decision.key_factors, vec!["Agent analysis"]);
    }

    #[test]
    fn test_keyword_fallback_block() {
        let raw = "Decision: BLOCK. Too many red flags on this one.";

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Block);
        assert!((decision.confidence - 0.8).abs() < f64::EPSILON);
        assert!((decision.risk_score - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_keywords_escalates() {
        let raw = "I am not sure what to make of this transaction.";

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Escalate);
        assert!((decision.confidence - 0.5).abs() < f64::EPSILON);
        assert!((decision.risk_score - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input_escalates() {
        let decision = parse_decision("");
        assert_eq!(decision.decision, Decision::Escalate);
        assert_eq!(decision.reasoning, "");
    }

    #[test]
    fn test_allow_without_decision_keyword_escalates() {
        // "allow" alone is not enough; the keyword scan needs "decision" too
        let decision = parse_decision("We should allow it.");
        assert_eq!(decision.decision, Decision::Escalate);
    }

    // Pins the greedy first-{-to-last-} heuristic: two valid fragments in
    // one reply span an invalid combined slice, which lands in the
    // parse-failure branch. Do not "fix" without revisiting the contract.
    #[test]
    fn test_multiple_json_fragments_pin_greedy_span() {
        let raw = r#"First draft {"decision": "ALLOW"} but actually {"decision": "BLOCK"}"#;

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Escalate);
        assert_eq!(decision.key_factors, vec!["Unable to parse response"]);
    }

    #[test]
    fn test_lowercase_decision_value_escalates() {
        let raw = r#"{"decision": "allow", "confidence": 0.9}"#;

        let decision = parse_decision(raw);
        assert_eq!(decision.decision, Decision::Escalate);
    }
}
