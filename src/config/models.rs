//! Configuration data structures for the folio-relay service.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the upstream completion provider, and the portfolio
//! knowledge source.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers, CORS).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream chat-completion provider settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Portfolio knowledge source settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the tokio runtime.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Browser origins allowed to call the API (the portfolio front-end).
    /// Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Settings for the upstream chat-completion provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Chat-completions endpoint every candidate is sent to.
    /// Default: Hugging Face router.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer credential for the provider. Usually supplied via `HF_TOKEN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Model tried before the fallback list. Usually supplied via `HF_MODEL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_model: Option<String>,

    /// Ordered fallback models tried after the preferred one.
    #[serde(default = "default_fallback_models")]
    pub fallback_models: Vec<String>,

    /// Per-attempt timeout. Unset means attempts are never cut short here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

// Hand-written so the token never reaches logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("preferred_model", &self.preferred_model)
            .field("fallback_models", &self.fallback_models)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Settings for the portfolio knowledge source.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KnowledgeConfig {
    /// TOML profile file. The built-in profile is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask credentials in logged upstream bodies.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_tokens: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            preferred_model: None,
            fallback_models: default_fallback_models(),
            timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_tokens: true,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_api_url() -> String {
    "https://router.huggingface.co/v1/chat/completions".to_string()
}

pub fn default_fallback_models() -> Vec<String> {
    vec![
        "meta-llama/Llama-3.1-8B-Instruct".to_string(),
        "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
        "google/gemma-2-9b-it".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
