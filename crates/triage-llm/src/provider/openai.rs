//! OpenAI provider implementation

use crate::client::{
    ChatRequest, ChatResponse, ContentBlock, LlmClient, Role, ToolInvocation,
};
use crate::error::{LlmError, Result};
use crate::provider::LlmProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// OpenAI provider (chat completions API, supports tool calling)
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            client: Client::new(),
        }
    }

    /// Override the API base URL (for proxies and tests)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Build the chat completions request body from a chat request.
///
/// Tool use maps onto OpenAI's shape: assistant `tool_calls` entries
/// with stringified arguments, and `tool`-role messages for results.
fn build_body(request: &ChatRequest) -> serde_json::Value {
    let mut messages: Vec<serde_json::Value> = Vec::new();

    if let Some(system) = &request.system {
        messages.push(json!({ "role": "system", "content": system }));
    }

    for message in &request.messages {
        match message.role {
            Role::User => {
                let mut text = String::new();
                for block in &message.blocks {
                    match block {
                        ContentBlock::Text { text: segment } => text.push_str(segment),
                        ContentBlock::ToolResult {
                            tool_use_id,
                            content,
                        } => {
                            messages.push(json!({
                                "role": "tool",
                                "tool_call_id": tool_use_id,
                                "content": content,
                            }));
                        }
                        ContentBlock::ToolUse(_) => {}
                    }
                }
                if !text.is_empty() {
                    messages.push(json!({ "role": "user", "content": text }));
                }
            }
            Role::Assistant => {
                let mut text = String::new();
                let mut tool_calls: Vec<serde_json::Value> = Vec::new();
                for block in &message.blocks {
                    match block {
                        ContentBlock::Text { text: segment } => text.push_str(segment),
                        ContentBlock::ToolUse(call) => {
                            tool_calls.push(json!({
                                "id": call.id,
                                "type": "function",
                                "function": {
                                    "name": call.name,
                                    "arguments": call.arguments.to_string(),
                                },
                            }));
                        }
                        ContentBlock::ToolResult { .. } => {}
                    }
                }
                let mut entry = json!({ "role": "assistant" });
                entry["content"] = if text.is_empty() {
                    serde_json::Value::Null
                } else {
                    json!(text)
                };
                if !tool_calls.is_empty() {
                    entry["tool_calls"] = json!(tool_calls);
                }
                messages.push(entry);
            }
        }
    }

    let mut body = json!({
        "model": request.model,
        "messages": messages,
    });

    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = json!(max_tokens);
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
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.input_schema,
                    },
                })
            })
            .collect();
        body["tools"] = json!(tools);
    }

    body
}

#[async_trait]
impl LlmClient for OpenAiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = build_body(&request);

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("OpenAI API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::ApiCallFailed(format!(
                "OpenAI API error ({}): {}",
                status, resp_text
            )));
        }

        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        let message = resp_json["choices"]
            .get(0)
            .map(|choice| &choice["message"])
            .ok_or_else(|| LlmError::InvalidResponse("OpenAI returned no choices".to_string()))?;

        let text = message["content"].as_str().unwrap_or_default().to_string();

        let mut tool_calls = Vec::new();
        if let Some(calls) = message["tool_calls"].as_array() {
            for call in calls {
                let name = call["function"]["name"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                if name.is_empty() {
                    continue;
                }
                // OpenAI returns arguments as a JSON string
                let arguments_raw = call["function"]["arguments"].as_str().unwrap_or("{}");
                let arguments: serde_json::Value = serde_json::from_str(arguments_raw)
                    .map_err(|e| {
                        LlmError::InvalidResponse(format!(
                            "Failed to parse tool arguments: {}",
                            e
                        ))
                    })?;
                tool_calls.push(ToolInvocation {
                    id: call["id"].as_str().unwrap_or_default().to_string(),
                    name,
                    arguments,
                });
            }
        }

        let finish_reason = resp_json["choices"][0]["finish_reason"]
            .as_str()
            .unwrap_or("stop")
            .to_string();

        let tokens_used = resp_json["usage"]["total_tokens"].as_u64().unwrap_or(0) as u32;

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
        "openai"
    }
}

impl LlmProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}
