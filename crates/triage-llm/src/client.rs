//! LLM client interface and types

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A named capability the model may invoke during a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (e.g., "escalate_to_human")
    pub name: String,

    /// Description of what the tool does, shown to the model
    pub description: String,

    /// JSON Schema for the tool's input
    pub input_schema: serde_json::Value,
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Provider-assigned invocation id, echoed back with the result
    pub id: String,

    /// Name of the tool being invoked
    pub name: String,

    /// Structured arguments as JSON
    pub arguments: serde_json::Value,
}

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One typed segment of a chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text
    Text { text: String },

    /// A tool invocation emitted by the model
    ToolUse(ToolInvocation),

    /// The result of a tool invocation, fed back to the model
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub blocks: Vec<ContentBlock>,
}

impl ChatMessage {
    /// A user turn containing plain text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            blocks: vec![ContentBlock::text(text)],
        }
    }

    /// An assistant turn with explicit content blocks
    pub fn assistant(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            blocks,
        }
    }

    /// A user turn carrying tool results back to the model
    pub fn tool_results(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            blocks,
        }
    }
}

/// Request to an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "claude-haiku-4-5", "gpt-4o")
    pub model: String,

    /// Conversation so far
    pub messages: Vec<ChatMessage>,

    /// System message/instructions
    pub system: Option<String>,

    /// Tools the model is allowed to invoke
    pub tools: Vec<ToolDefinition>,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Temperature for sampling (0.0 - 1.0)
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: String, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            system: None,
            tools: Vec::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set system message
    pub fn with_system(mut self, system: String) -> Self {
        self.system = Some(system);
        self
    }

    /// Declare the tools available to the model
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated text (all text blocks concatenated)
    pub text: String,

    /// Tool invocations the model requested this turn
    pub tool_calls: Vec<ToolInvocation>,

    /// Model that generated the response
    pub model: String,

    /// Number of tokens used
    pub tokens_used: u32,

    /// Finish reason (e.g., "end_turn", "tool_use")
    pub finish_reason: String,
}

impl ChatResponse {
    /// Create a new text-only response
    pub fn new(text: String, model: String) -> Self {
        Self {
            text,
            tool_calls: Vec::new(),
            model,
            tokens_used: 0,
            finish_reason: "end_turn".to_string(),
        }
    }

    /// Set tokens used
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens_used = tokens;
        self
    }

    /// Set finish reason
    pub fn with_finish_reason(mut self, reason: String) -> Self {
        self.finish_reason = reason;
        self
    }

    /// Add a tool invocation
    pub fn with_tool_call(mut self, call: ToolInvocation) -> Self {
        self.tool_calls.push(call);
        self.finish_reason = "tool_use".to_string();
        self
    }
}

/// Async LLM client trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one chat turn to the model
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Check if this client supports tool invocation
    fn supports_tools(&self) -> bool {
        false
    }

    /// Get the name of this client
    fn name(&self) -> &str;
}
