//! Server configuration
//!
//! Configuration is assembled from an optional `config/server` file and
//! `TRIAGE`-prefixed environment variables, then handed to the service
//! and dispatcher constructors as explicit structs. Components never
//! read the process environment themselves, which keeps tests
//! deterministic.

use serde::{Deserialize, Serialize};
use triage_agent::EscalationConfig;

/// Model provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider name: "anthropic", "openai", or "mock"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier passed through to the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to the provider's conventional environment
    /// variable when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Generation budget per model turn
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_model() -> String {
    "claude-haiku-4-5".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (HTTP)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Model provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Escalation delivery settings; mock mode applies while the SMTP
    /// credential pair is incomplete
    #[serde(default)]
    pub escalation: EscalationConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            llm: LlmSettings::default(),
            escalation: EscalationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("TRIAGE").separator("__"))
            .build();

        let mut cfg: ServerConfig = match config_result {
            Ok(raw) => raw
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?,
            Err(_) => Self::default(),
        };

        // Conventional environment fallbacks
        if cfg.llm.api_key.is_none() {
            cfg.llm.api_key = match cfg.llm.provider.as_str() {
                "anthropic" => std::env::var("ANTHROPIC_API_KEY").ok(),
                "openai" => std::env::var("OPENAI_API_KEY").ok(),
                _ => None,
            };
        }
        if cfg.escalation.smtp_user.is_none() {
            cfg.escalation.smtp_user = std::env::var("SMTP_USER").ok();
        }
        if cfg.escalation.smtp_pass.is_none() {
            cfg.escalation.smtp_pass = std::env::var("SMTP_PASS").ok();
        }

        Ok(cfg)
    }
}
