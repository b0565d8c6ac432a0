//! Escalation notification dispatch
//!
//! Notifies a human fraud analyst when the model escalates. Two modes,
//! selected by credential presence:
//! - **Mock mode** (no SMTP credentials): the full notification is built
//!   and recorded for observability instead of transmitted; delivery
//!   always reports success.
//! - **Live mode**: the notification is sent over SMTP to the configured
//!   recipient.
//!
//! The dispatcher never raises past its own boundary: transport failures
//! are converted into an [`EscalationOutcome`] with `success: false`,
//! so neither the orchestrating service nor the model-calling layer
//! needs a fault handler specific to notification delivery.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{error, info};
use triage_core::{EscalationOutcome, EscalationRequest};
use triage_llm::{AgentTool, ToolDefinition};

/// Escalation delivery configuration.
///
/// Passed in explicitly (never read from the process environment inside
/// the dispatcher) so tests stay deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationConfig {
    /// Where escalation notifications go
    pub recipient: String,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP username; also used as the sender address
    #[serde(default)]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[serde(default)]
    pub smtp_pass: Option<String>,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            recipient: "fraud-team@example.com".to_string(),
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_user: None,
            smtp_pass: None,
        }
    }
}

impl EscalationConfig {
    /// Mock mode applies whenever the credential pair is incomplete
    pub fn is_mock(&self) -> bool {
        self.smtp_user.is_none() || self.smtp_pass.is_none()
    }
}

/// Notification delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A mail address failed to parse
    #[error("invalid mail address: {0}")]
    Address(String),

    /// The SMTP transport rejected the message or could not be built
    #[error("smtp transport error: {0}")]
    Transport(String),
}

/// A fully rendered notification, ready for a transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail transport seam. Live delivery goes through SMTP; tests
/// inject stubs so no socket is ever opened.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), NotifyError>;
}

/// SMTP transport backed by lettre
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailTransport {
    /// Build a STARTTLS relay from the configured credentials
    pub fn new(config: &EscalationConfig) -> Result<Self, NotifyError> {
        let user = config.smtp_user.clone().ok_or_else(|| {
            NotifyError::Transport("smtp credentials not configured".to_string())
        })?;
        let pass = config.smtp_pass.clone().ok_or_else(|| {
            NotifyError::Transport("smtp credentials not configured".to_string())
        })?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(user.clone(), pass))
            .build();

        Ok(Self { mailer, from: user })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(self
                .from
                .parse()
                .map_err(|e| NotifyError::Address(format!("{}: {}", self.from, e)))?)
            .to(message
                .to
                .parse()
                .map_err(|e| NotifyError::Address(format!("{}: {}", message.to, e)))?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.body.clone())
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Escalation notification dispatcher.
///
/// Also the `escalate_to_human` tool the model can invoke during
/// analysis.
pub struct EscalationNotifier {
    config: EscalationConfig,
    transport: Option<Arc<dyn MailTransport>>,
    recorded: Mutex<Vec<MailMessage>>,
}

impl EscalationNotifier {
    /// Mock-mode notifier: notifications are recorded, never transmitted
    pub fn mock(config: EscalationConfig) -> Self {
        Self {
            config,
            transport: None,
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Live-mode notifier with an explicit transport
    pub fn live(config: EscalationConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config,
            transport: Some(transport),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Pick the mode from credential presence. Without a complete
    /// credential pair no real network send is ever attempted.
    pub fn from_config(config: EscalationConfig) -> Result<Self, NotifyError> {
        if config.is_mock() {
            Ok(Self::mock(config))
        } else {
            let transport = SmtpMailTransport::new(&config)?;
            Ok(Self::live(config, Arc::new(transport)))
        }
    }

    /// Whether this notifier records instead of transmitting
    pub fn is_mock(&self) -> bool {
        self.transport.is_none()
    }

    /// Notifications recorded in mock mode
    pub fn recorded(&self) -> Vec<MailMessage> {
        self.recorded.lock().unwrap().clone()
    }

    /// Attempt delivery of one escalation notification.
    ///
    /// Never fails: transport errors come back as an outcome with
    /// `success: false` and the alert id intact.
    pub async fn dispatch(&self, request: &EscalationRequest) -> EscalationOutcome {
        match &self.transport {
            None => {
                let message = MailMessage {
                    to: self.config.recipient.clone(),
                    subject: subject(&request.alert_id),
                    body: plain_body(request),
                };
                info!(
                    alert_id = %request.alert_id,
                    to = %message.to,
                    "escalation notification recorded (mock mode)"
                );
                self.recorded.lock().unwrap().push(message);

                EscalationOutcome::delivered(
                    format!(
                        "Escalation notification sent (mock mode) to {}",
                        self.config.recipient
                    ),
                    request.alert_id.clone(),
                    now_rfc3339(),
                )
            }
            Some(transport) => {
                let message = MailMessage {
                    to: self.config.recipient.clone(),
                    subject: subject(&request.alert_id),
                    body: html_body(request),
                };

                match transport.send(&message).await {
                    Ok(()) => {
                        info!(
                            alert_id = %request.alert_id,
                            to = %message.to,
                            "escalation notification sent"
                        );
                        EscalationOutcome::delivered(
                            format!(
                                "Escalation notification sent to {}",
                                self.config.recipient
                            ),
                            request.alert_id.clone(),
                            now_rfc3339(),
                        )
                    }
                    Err(err) => {
                        error!(alert_id = %request.alert_id, error = %err, "escalation delivery failed");
                        EscalationOutcome::failed(
                            format!("Failed to send escalation: {}", err),
                            request.alert_id.clone(),
                        )
                    }
                }
            }
        }
    }
}

#[async_trait]
impl AgentTool for EscalationNotifier {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "escalate_to_human".to_string(),
            description: "Escalate a transaction to a human fraud analyst for manual review \
                          when the automated system is uncertain about the fraud decision"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "alert_id": {
                        "type": "string",
                        "description": "The unique alert ID for this transaction"
                    },
                    "tx_id": {
                        "type": "string",
                        "description": "The transaction ID"
                    },
                    "reason": {
                        "type": "string",
                        "description": "Detailed explanation of why this transaction needs human review"
                    },
                    "risk_factors": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of specific risk factors that triggered escalation"
                    },
                    "customer_id": {
                        "type": "string",
                        "description": "The customer ID involved in the transaction"
                    },
                    "amount": {
                        "type": "number",
                        "description": "Transaction amount"
                    },
                    "merchant_name": {
                        "type": "string",
                        "description": "Merchant name"
                    }
                },
                "required": ["alert_id", "tx_id", "reason", "risk_factors", "customer_id", "amount", "merchant_name"]
            }),
        }
    }

    async fn invoke(&self, arguments: serde_json::Value) -> serde_json::Value {
        let request: EscalationRequest = match serde_json::from_value(arguments) {
            Ok(request) => request,
            Err(err) => {
                let outcome = EscalationOutcome::failed(
                    format!("Invalid escalation arguments: {}", err),
                    String::new(),
                );
                return outcome_json(&outcome);
            }
        };

        let outcome = self.dispatch(&request).await;
        outcome_json(&outcome)
    }
}

fn outcome_json(outcome: &EscalationOutcome) -> serde_json::Value {
    serde_json::to_value(outcome)
        .unwrap_or_else(|_| serde_json::json!({ "success": false }))
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn subject(alert_id: &str) -> String {
    format!("FRAUD ALERT ESCALATION - {}", alert_id)
}

/// Plain-text body used in mock mode
fn plain_body(request: &EscalationRequest) -> String {
    let factors = request
        .risk_factors
        .iter()
        .enumerate()
        .map(|(i, factor)| format!("{}. {}", i + 1, factor))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "TRANSACTION REQUIRES MANUAL REVIEW\n\
         \n\
         Alert ID: {alert_id}\n\
         Transaction ID: {tx_id}\n\
         Customer ID: {customer_id}\n\
         Amount: ${amount:.2}\n\
         Merchant: {merchant_name}\n\
         \n\
         ESCALATION REASON:\n\
         {reason}\n\
         \n\
         RISK FACTORS:\n\
         {factors}\n\
         \n\
         ACTION REQUIRED:\n\
         Please review this transaction and make a final determination (ALLOW/BLOCK).",
        alert_id = request.alert_id,
        tx_id = request.tx_id,
        customer_id = request.customer_id,
        amount = request.amount,
        merchant_name = request.merchant_name,
        reason = request.reason,
        factors = factors,
    )
}

/// Formatted body used in live mode
fn html_body(request: &EscalationRequest) -> String {
    let factors = request
        .risk_factors
        .iter()
        .map(|factor| format!("<li>{}</li>", factor))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<h2>TRANSACTION REQUIRES MANUAL REVIEW</h2>\n\
         <table>\n\
         <tr><td><strong>Alert ID</strong></td><td>{alert_id}</td></tr>\n\
         <tr><td><strong>Transaction ID</strong></td><td>{tx_id}</td></tr>\n\
         <tr><td><strong>Customer ID</strong></td><td>{customer_id}</td></tr>\n\
         <tr><td><strong>Amount</strong></td><td>${amount:.2}</td></tr>\n\
         <tr><td><strong>Merchant</strong></td><td>{merchant_name}</td></tr>\n\
         </table>\n\
         <h3>ESCALATION REASON</h3>\n\
         <p>{reason}</p>\n\
         <h3>RISK FACTORS</h3>\n\
         <ul>\n{factors}\n</ul>\n\
         <p><strong>ACTION REQUIRED:</strong> Please review this transaction and make a \
         final determination (ALLOW/BLOCK).</p>",
        alert_id = request.alert_id,
        tx_id = request.tx_id,
        customer_id = request.customer_id,
        amount = request.amount,
        merchant_name = request.merchant_name,
        reason = request.reason,
        factors = factors,
    )
}
