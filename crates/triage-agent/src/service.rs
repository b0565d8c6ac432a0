//! Fraud analysis orchestration
//!
//! One request flows: envelope validation, full decode, prompt render,
//! model conversation (with the escalation tool exposed), decision
//! parse, result assembly. Each request is independent and stateless;
//! the only suspension points are the model call and any escalation
//! delivery the model triggers inside it.

use crate::audit::{AuditSink, NoopAuditSink};
use crate::error::AnalysisError;
use crate::instructions::ANALYST_INSTRUCTIONS;
use crate::notify::EscalationNotifier;
use crate::parser::parse_decision;
use crate::prompt::render_prompt;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use triage_core::{validate_envelope, AnalysisResult, TransactionAlert};
use triage_llm::{
    AgentTool, ChatMessage, ChatRequest, ContentBlock, LlmClient, LlmError, Role,
};

/// Model invocation settings
#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Model identifier passed to the provider
    pub model: String,

    /// Generation budget per turn
    pub max_tokens: u32,

    /// How many tool round-trips to allow before taking the last text
    /// response as final
    pub max_tool_rounds: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "claude-haiku-4-5".to_string(),
            max_tokens: 1024,
            max_tool_rounds: 4,
        }
    }
}

/// Per-request fraud analysis orchestrator
pub struct FraudAnalysisService {
    client: Arc<dyn LlmClient>,
    notifier: Arc<EscalationNotifier>,
    settings: AgentSettings,
    audit: Arc<dyn AuditSink>,
}

impl FraudAnalysisService {
    pub fn new(
        client: Arc<dyn LlmClient>,
        notifier: Arc<EscalationNotifier>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            client,
            notifier,
            settings,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replace the default no-op audit sink
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Analyze one raw alert document.
    ///
    /// Fails fast with [`AnalysisError::InvalidAlert`] before any model
    /// call when the envelope is unprocessable; fails with
    /// [`AnalysisError::ModelCall`] when the upstream call errors. Model
    /// text that merely parses poorly is absorbed by the decision parser
    /// and still yields a complete result.
    pub async fn analyze(
        &self,
        raw: serde_json::Value,
    ) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();

        validate_envelope(&raw).map_err(|e| AnalysisError::InvalidAlert(e.to_string()))?;
        let alert: TransactionAlert = serde_json::from_value(raw)
            .map_err(|e| AnalysisError::InvalidAlert(e.to_string()))?;

        let prompt = render_prompt(&alert);
        debug!(alert_id = %alert.alert_id, prompt_len = prompt.len(), "rendered analysis prompt");

        let agent_response = self.run_conversation(prompt).await?;
        let decision = parse_decision(&agent_response);

        let result = AnalysisResult {
            alert_id: alert.alert_id.clone(),
            decision,
            processing_time_ms: started.elapsed().as_millis() as u64,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            agent_response,
        };

        info!(
            alert_id = %result.alert_id,
            decision = %result.decision.decision,
            confidence = result.decision.confidence,
            processing_time_ms = result.processing_time_ms,
            "fraud analysis complete"
        );
        self.audit.record(&result);

        Ok(result)
    }

    /// Drive the model until it stops requesting tools, feeding each
    /// tool result back into the conversation.
    async fn run_conversation(&self, prompt: String) -> Result<String, LlmError> {
        let tool = self.notifier.definition();
        let mut messages = vec![ChatMessage::user(prompt)];
        let mut last_text = String::new();

        for round in 0..=self.settings.max_tool_rounds {
            let request = ChatRequest::new(self.settings.model.clone(), messages.clone())
                .with_system(ANALYST_INSTRUCTIONS.to_string())
                .with_max_tokens(self.settings.max_tokens)
                .with_tools(vec![tool.clone()]);

            let response = self.client.chat(request).await?;
            if !response.text.is_empty() {
                last_text = response.text.clone();
            }

            if response.tool_calls.is_empty() || round == self.settings.max_tool_rounds {
                break;
            }

            let mut assistant_blocks = Vec::new();
            if !response.text.is_empty() {
                assistant_blocks.push(ContentBlock::text(response.text.clone()));
            }

            let mut result_blocks = Vec::new();
            for call in &response.tool_calls {
                debug!(tool = %call.name, "model invoked tool");
                let output = if call.name == tool.name {
                    self.notifier.invoke(call.arguments.clone()).await
                } else {
                    // Unknown tool names get an error payload as their
                    // result; the conversation stays alive.
                    serde_json::json!({ "error": format!("unknown tool: {}", call.name) })
                };
                assistant_blocks.push(ContentBlock::ToolUse(call.clone()));
                result_blocks.push(ContentBlock::ToolResult {
                    tool_use_id: call.id.clone(),
                    content: output.to_string(),
                });
            }

            messages.push(ChatMessage::assistant(assistant_blocks));
            messages.push(ChatMessage {
                role: Role::User,
                blocks: result_blocks,
            });
        }

        Ok(last_text)
    }
}
