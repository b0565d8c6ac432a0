//! Triage Core - Core types for the fraud triage service
//!
//! This crate provides the fundamental types shared across the triage
//! workspace:
//! - Transaction alert input model and envelope validation
//! - Fraud decision and analysis result types
//! - Escalation request/outcome types
//! - Error types

pub mod alert;
pub mod decision;
pub mod error;
pub mod escalation;

// Re-export commonly used types
pub use alert::{
    validate_envelope, Customer, KycStatus, Merchant, MerchantRisk, Signals, SupportingContext,
    Transaction, TransactionAlert, Velocity,
};
pub use decision::{AnalysisResult, Decision, FraudDecision};
pub use error::ValidationError;
pub use escalation::{EscalationOutcome, EscalationRequest};
