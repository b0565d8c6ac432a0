//! LLM provider implementations

use crate::client::LlmClient;

/// LLM provider trait
pub trait LlmProvider: LlmClient {
    /// Get the provider name
    fn provider_name(&self) -> &str;
}

// Re-export all providers
mod anthropic;
mod mock;
mod openai;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;
