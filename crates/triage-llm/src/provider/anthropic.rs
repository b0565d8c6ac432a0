//! Anthropic provider implementation

use crate::client::{
    ChatRequest, ChatResponse, ContentBlock, LlmClient, Role, ToolInvocation,
};
use crate::error::{LlmError, Result};
use crate::provider::LlmProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Anthropic provider (Claude messages API, supports tool use)
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.anthropic.com/v1".to_string(),
            client: Client::new(),
        }
    }

    /// Override the API base URL (for proxies and tests)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Build the messages API request body from a chat request
fn build_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|message| {
            let role = match message.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            let content: Vec<serde_json::Value> = message
                .blocks
                .iter()
                .map(|block| match block {
                    ContentBlock::Text { text } => json!({
                        "type": "text",
                        "text": text,
                    }),
                    ContentBlock::ToolUse(call) => json!({
                        "type": "tool_use",
                        "id": call.id,
                        "name": call.name,
                        "input": call.arguments,
                    }),
                    ContentBlock::ToolResult {
                        tool_use_id,
                        content,
                    } => json!({
                        "type": "tool_result",
                        "tool_use_id": tool_use_id,
                        "content": content,
                    }),
                })
                .collect();
            json!({ "role": role, "content": content })
        })
        .collect();

    let mut body = json!({
        "model": request.model,
        "messages": messages,
        "max_tokens": request.max_tokens.unwrap_or(4096),
    });

    if let Some(system) = &request.system {
        body["system"] = json!(system);
    }
    if let Some(temperature) = request.temperature {
        body["temperature"] = json!(temperature);
    }
    if !request.tools.is_empty() {
        let tools: Vec<serde_json::Value> = request
            .tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "input_schema": tool.input_schema,
                })
            })
            .collect();
        body["tools"] = json!(tools);
    }

    body
}

#[async_trait]
impl LlmClient for AnthropicProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = build_body(&request);

        // Make API call
        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("Anthropic API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::ApiCallFailed(format!(
                "Anthropic API error ({}): {}",
                status, resp_text
            )));
        }

        // Parse response
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        // Extract content blocks
        let content_blocks = resp_json["content"]
            .as_array()
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))?;

        let mut text = String::new();
        let mut tool_calls = Vec::new();

        for block in content_blocks {
            match block["type"].as_str() {
                Some("text") => {
                    if let Some(segment) = block["text"].as_str() {
                        text.push_str(segment);
                    }
                }
                Some("tool_use") => {
                    let id = block["id"].as_str().unwrap_or_default().to_string();
                    let name = block["name"].as_str().unwrap_or_default().to_string();
                    if name.is_empty() {
                        return Err(LlmError::InvalidResponse(
                            "tool_use block without a name".to_string(),
                        ));
                    }
                    tool_calls.push(ToolInvocation {
                        id,
                        name,
                        arguments: block["input"].clone(),
                    });
                }
                _ => {}
            }
        }

        let finish_reason = resp_json["stop_reason"]
            .as_str()
            .unwrap_or("end_turn")
            .to_string();

        let tokens_used = resp_json["usage"]["input_tokens"].as_u64().unwrap_or(0) as u32
            + resp_json["usage"]["output_tokens"].as_u64().unwrap_or(0) as u32;

        let mut response = ChatResponse::new(text, request.model.clone())
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason);
        response.tool_calls = tool_calls;

        Ok(response)
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}
