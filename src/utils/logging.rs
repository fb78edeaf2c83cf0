//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the upstream credential from leaking into logs.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Longest upstream body excerpt written to a log line.
const MAX_LOGGED_BODY: usize = 500;

static BEARER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)bearer\s+[A-Za-z0-9._~+/=-]+").expect("bearer pattern is valid")
});

static HF_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bhf_[A-Za-z0-9]{8,}").expect("token pattern is valid")
});

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Sanitizes credentials from strings headed for a log sink.
///
/// Replaces `Bearer <token>` headers and Hugging Face `hf_` access tokens
/// with a `\[REDACTED\]` placeholder.
pub fn sanitize(input: &str) -> String {
    let result = BEARER.replace_all(input, "Bearer [REDACTED_TOKEN]");
    HF_TOKEN
        .replace_all(&result, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Truncated, optionally sanitized excerpt of an upstream body for logging.
pub fn body_excerpt(body: &str, sanitize_tokens: bool) -> String {
    let excerpt: String = body.chars().take(MAX_LOGGED_BODY).collect();
    if sanitize_tokens {
        sanitize(&excerpt)
    } else {
        excerpt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_bearer_header() {
        let input = "Authorization: Bearer abc.DEF-123_xyz";
        let output = sanitize(input);
        assert!(output.contains("[REDACTED_TOKEN]"));
        assert!(!output.contains("abc.DEF-123_xyz"));
    }

    #[test]
    fn test_sanitize_hf_token() {
        let input = r#"{"error":"Invalid token hf_AbCdEfGh12345678 for this route"}"#;
        let output = sanitize(input);
        assert!(output.contains("[REDACTED_TOKEN]"));
        assert!(!output.contains("hf_AbCdEfGh12345678"));
        assert!(output.contains("for this route"));
    }

    #[test]
    fn test_body_excerpt_truncates() {
        let body = "x".repeat(2_000);
        assert_eq!(body_excerpt(&body, true).len(), MAX_LOGGED_BODY);
        assert_eq!(body_excerpt("short", false), "short");
    }
}
