//! Tool seam for model-invocable capabilities
//!
//! Tools are declared to the model by JSON schema and invoked with the
//! arguments the model produced. An implementation must never fail past
//! its own boundary: errors are reported inside the returned JSON value
//! so the conversation with the model stays alive.

use crate::client::ToolDefinition;
use async_trait::async_trait;

/// A capability the fraud agent may invoke on the model's behalf
#[async_trait]
pub trait AgentTool: Send + Sync {
    /// The schema-validated declaration shown to the model
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool. The returned value is serialized back to the
    /// model verbatim; failures are encoded in it, never raised.
    async fn invoke(&self, arguments: serde_json::Value) -> serde_json::Value;
}
