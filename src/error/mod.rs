// Error types for folio-relay
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One candidate's failed attempt, kept in the sequencer's last-error slot.
///
/// `status` is `None` when the attempt never produced an HTTP response
/// (connection refused, DNS failure, timeout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateFailure {
    pub status: Option<u16>,
    pub model: String,
    pub raw: String,
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} returned HTTP {}", self.model, status),
            None => write!(f, "{} unreachable: {}", self.model, self.raw),
        }
    }
}

#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing upstream credential or an unusable candidate list.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("No supported model found for your enabled providers (tried {})", .tried.join(", "))]
    AllCandidatesExhausted {
        tried: Vec<String>,
        last_error: Option<CandidateFailure>,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Knowledge error: {0}")]
    Knowledge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => "configuration",
            RelayError::MalformedRequest(_) => "malformed_request",
            RelayError::AllCandidatesExhausted { .. } => "candidates_exhausted",
            RelayError::Config(_) | RelayError::ConfigParsing(_) => "config",
            RelayError::Knowledge(_) => "knowledge",
            _ => "internal",
        }
    }
}

// Every relay failure is a server error; the body shape depends on the variant.
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = match self {
            RelayError::Configuration(message) => json!({ "error": message }),
            RelayError::MalformedRequest(details) => json!({
                "error": "Chat route error",
                "details": details,
            }),
            RelayError::AllCandidatesExhausted { tried, last_error } => json!({
                "error": "No supported model found for your enabled providers.",
                "tried": tried,
                "lastError": last_error,
            }),
            other => json!({
                "error": other.kind(),
                "details": other.to_string(),
            }),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
