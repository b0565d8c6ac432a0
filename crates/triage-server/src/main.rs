//! Fraud Triage HTTP Server
//!
//! Receives transaction-risk alerts, asks the configured model for a
//! fraud verdict, and serves the structured result.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_agent::{
    AgentSettings, EscalationNotifier, FraudAnalysisService, TracingAuditSink,
};
use triage_llm::{AnthropicProvider, LlmClient, MockProvider, OpenAiProvider};
use triage_server::api::create_router;
use triage_server::config::{LlmSettings, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;
    info!(
        host = %config.host,
        port = config.port,
        provider = %config.llm.provider,
        model = %config.llm.model,
        "Loaded configuration"
    );

    // Build the model client
    let client = build_provider(&config.llm)?;

    // Build the escalation notifier; mock mode unless SMTP credentials
    // are fully configured
    let notifier = Arc::new(EscalationNotifier::from_config(config.escalation.clone())?);
    info!(
        recipient = %config.escalation.recipient,
        mode = if notifier.is_mock() { "mock" } else { "smtp" },
        "Escalation notifier ready"
    );

    // Build the analysis service
    let service = FraudAnalysisService::new(
        client,
        notifier,
        AgentSettings {
            model: config.llm.model.clone(),
            max_tokens: config.llm.max_tokens,
            ..AgentSettings::default()
        },
    )
    .with_audit_sink(Arc::new(TracingAuditSink));

    // Create router
    let app = create_router(Arc::new(service));

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Analyze API: POST http://{}/api/analyze", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let level = config.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "triage_server={level},triage_agent={level},triage_llm={level},tower_http=debug"
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Build the configured model provider
fn build_provider(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>> {
    match settings.provider.as_str() {
        "anthropic" => {
            let api_key = settings.api_key.clone().context(
                "anthropic provider requires an API key (TRIAGE__LLM__API_KEY or ANTHROPIC_API_KEY)",
            )?;
            Ok(Arc::new(AnthropicProvider::new(api_key)))
        }
        "openai" => {
            let api_key = settings.api_key.clone().context(
                "openai provider requires an API key (TRIAGE__LLM__API_KEY or OPENAI_API_KEY)",
            )?;
            Ok(Arc::new(OpenAiProvider::new(api_key)))
        }
        "mock" => Ok(Arc::new(MockProvider::new())),
        other => anyhow::bail!("unknown llm provider: {}", other),
    }
}
