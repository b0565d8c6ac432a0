//! Escalation request/outcome types
//!
//! An [`EscalationRequest`] is constructed transiently whenever the model
//! elects to route a transaction to a human reviewer. It is consumed by
//! the notification dispatcher and never persisted by this system.

use serde::{Deserialize, Serialize};

/// A request to notify a human fraud analyst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationRequest {
    /// The alert being escalated
    pub alert_id: String,

    /// The transaction under review
    pub tx_id: String,

    /// Why this transaction needs human review
    pub reason: String,

    /// Specific risk factors that triggered the escalation
    pub risk_factors: Vec<String>,

    /// Customer involved in the transaction
    pub customer_id: String,

    /// Transaction amount
    pub amount: f64,

    /// Merchant name
    pub merchant_name: String,
}

/// Result of attempting a notification delivery.
///
/// `alert_id` is carried through even on failure so the caller can retry
/// or escalate further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationOutcome {
    pub success: bool,
    pub message: String,
    pub alert_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_timestamp: Option<String>,
}

impl EscalationOutcome {
    /// A successful delivery, stamped with the delivery time
    pub fn delivered(message: String, alert_id: String, timestamp: String) -> Self {
        Self {
            success: true,
            message,
            alert_id,
            escalation_timestamp: Some(timestamp),
        }
    }

    /// A failed delivery; the alert id stays intact
    pub fn failed(message: String, alert_id: String) -> Self {
        Self {
            success: false,
            message,
            alert_id,
            escalation_timestamp: None,
        }
    }
}
