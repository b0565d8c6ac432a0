//! Mock LLM provider for testing

use crate::client::{ChatRequest, ChatResponse, LlmClient, ToolInvocation};
use crate::error::Result;
use crate::provider::LlmProvider;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock LLM provider for testing.
///
/// Responses are served from a scripted queue; once the queue is drained
/// the default response is returned. Every call is counted so tests can
/// assert how many times the model was (or was not) reached.
pub struct MockProvider {
    name: String,
    responses: Mutex<VecDeque<ChatResponse>>,
    default_response: String,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Mutex::new(VecDeque::new()),
            default_response: "Mock LLM response".to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create with a custom default response text
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses: Mutex::new(VecDeque::new()),
            default_response: response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create with a scripted sequence of responses
    pub fn with_script(responses: Vec<ChatResponse>) -> Self {
        Self {
            name: "mock".to_string(),
            responses: Mutex::new(responses.into()),
            default_response: "Mock LLM response".to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Convenience: a scripted tool-call response
    pub fn tool_call_response(name: impl Into<String>, arguments: serde_json::Value) -> ChatResponse {
        ChatResponse::new(String::new(), "mock-model".to_string()).with_tool_call(
            ToolInvocation {
                id: "toolu_mock_01".to_string(),
                name: name.into(),
                arguments,
            },
        )
    }

    /// How many times `chat` has been called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.responses.lock().unwrap().pop_front();
        let response = match scripted {
            Some(mut response) => {
                response.model = request.model;
                response
            }
            None => ChatResponse::new(self.default_response.clone(), request.model)
                .with_tokens(10)
                .with_finish_reason("end_turn".to_string()),
        };

        Ok(response)
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LlmProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "Mock"
    }
}
