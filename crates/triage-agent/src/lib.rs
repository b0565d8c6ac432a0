//! Fraud analysis agent
//!
//! This crate holds the request lifecycle between the HTTP surface and
//! the model boundary:
//! - `prompt`: deterministic alert-to-prompt rendering
//! - `parser`: total model-text-to-decision parsing with fallbacks
//! - `notify`: escalation notification dispatch (mock or SMTP)
//! - `service`: per-request orchestration
//! - `instructions`: the analyst system prompt
//! - `audit`: pluggable result observability hook (no-op by default)

pub use audit::{AuditSink, NoopAuditSink, TracingAuditSink};
pub use error::AnalysisError;
pub use notify::{EscalationConfig, EscalationNotifier, MailMessage, MailTransport, NotifyError};
pub use parser::parse_decision;
pub use prompt::render_prompt;
pub use service::{AgentSettings, FraudAnalysisService};

pub mod audit;
pub mod error;
pub mod instructions;
pub mod notify;
pub mod parser;
pub mod prompt;
pub mod service;
