//! Transaction alert input model
//!
//! A [`TransactionAlert`] is one transaction flagged upstream for risk
//! review. It is immutable once received; nothing in this workspace
//! mutates an alert after construction.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One transaction flagged for risk review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionAlert {
    /// Unique alert identifier assigned upstream
    pub alert_id: String,

    /// When the alert entered the review queue (RFC 3339)
    pub ingest_ts: String,

    /// The transaction under review
    pub transaction: Transaction,

    /// Merchant the transaction was made with
    pub merchant: Merchant,

    /// Account holder profile
    pub customer: Customer,

    /// Fraud signals computed upstream
    pub signals: Signals,

    /// Names of rule-engine rules that fired for this transaction.
    /// Rules are evaluated upstream; only their names arrive here.
    #[serde(default)]
    pub rule_engine_flags: Vec<String>,

    /// Free-form supporting context for the analyst
    pub supporting_context: SupportingContext,
}

/// Transaction details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_id: String,
    pub amount: f64,
    pub currency: String,
    pub timestamp: String,
    pub payment_method: String,
    pub card_last4: String,
}

/// Merchant details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    pub merchant_id: String,
    pub name: String,
    pub merchant_risk: MerchantRisk,
    pub country: String,
}

/// Merchant risk tier assigned upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantRisk {
    Low,
    Medium,
    High,
}

impl MerchantRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantRisk::Low => "low",
            MerchantRisk::Medium => "medium",
            MerchantRisk::High => "high",
        }
    }
}

impl fmt::Display for MerchantRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub account_age_days: u32,
    pub kyc_status: KycStatus,
    /// Fraction of past transactions charged back, in [0, 1]
    pub chargeback_rate: f64,
}

/// Know-Your-Customer verification status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Verified,
    Unverified,
    Pending,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Verified => "verified",
            KycStatus::Unverified => "unverified",
            KycStatus::Pending => "pending",
            KycStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fraud signals computed upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signals {
    pub ip_country: String,
    pub device_fingerprint: String,
    pub velocity: Velocity,
    /// Third-party fraud score in [0, 1]
    pub fraud_score_third_party: f64,
}

/// Rolling-window transaction velocity counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Velocity {
    pub tx_last_1h: u32,
    pub tx_last_24h: u32,
    pub amount_last_24h: f64,
}

/// Free-form supporting context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportingContext {
    #[serde(default)]
    pub recent_events: Vec<String>,
    #[serde(default)]
    pub prior_disputes: u32,
    #[serde(default)]
    pub notes: String,
}

/// Check that a raw alert document carries the fields without which the
/// request cannot be processed at all.
///
/// Absence of `alert_id` or the nested `transaction` object is a
/// validation failure (a client-input error), distinct from any decode
/// or parse failure further down the pipeline.
pub fn validate_envelope(raw: &serde_json::Value) -> Result<(), ValidationError> {
    match raw.get("alert_id") {
        None | Some(serde_json::Value::Null) => {
            return Err(ValidationError::MissingField("alert_id"))
        }
        Some(serde_json::Value::String(s)) if s.is_empty() => {
            return Err(ValidationError::MissingField("alert_id"))
        }
        Some(serde_json::Value::String(_)) => {}
        Some(_) => return Err(ValidationError::InvalidField("alert_id")),
    }

    match raw.get("transaction") {
        None | Some(serde_json::Value::Null) => {
            Err(ValidationError::MissingField("transaction"))
        }
        Some(serde_json::Value::Object(_)) => Ok(()),
        Some(_) => Err(ValidationError::InvalidField("transaction")),
    }
}
