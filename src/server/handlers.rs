// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{RelayError, Result};
use crate::models::{ChatReply, ChatRequest};
use axum::body::Bytes;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

impl HealthCheck {
    fn ok(message: String) -> Self {
        Self {
            status: "ok".to_string(),
            message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub greeting: String,
    pub suggested_questions: Vec<String>,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    let credential_check = if state.relay.has_credential() {
        HealthCheck::ok("Upstream credential configured".to_string())
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "error".to_string(),
            message: format!(
                "{} is not set; chat requests will fail",
                crate::config::TOKEN_ENV
            ),
        }
    };
    checks.insert("upstream_credential".to_string(), credential_check);

    checks.insert(
        "model_candidates".to_string(),
        HealthCheck::ok(state.relay.candidates().as_slice().join(", ")),
    );

    let stats = state.relay.cache().stats();
    checks.insert(
        "response_cache".to_string(),
        HealthCheck::ok(format!(
            "{} entries, {} hits, {} misses",
            state.relay.cache().len(),
            stats.hits,
            stats.misses
        )),
    );

    checks.insert(
        "upstream_endpoint".to_string(),
        HealthCheck::ok(state.config.upstream.api_url.clone()),
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for `POST /api/chat`
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes, // parsed by hand so malformed bodies get the relay's error shape
) -> Result<Json<ChatReply>> {
    let started = Instant::now();
    let result = relay_chat(&state, &body).await;
    let elapsed = started.elapsed().as_secs_f64();

    match &result {
        Ok(reply) => {
            let outcome = if reply.is_cached() { "cached" } else { "fresh" };
            crate::metrics::record_request("/api/chat", 200, outcome, elapsed);
        }
        Err(e) => {
            error!(kind = e.kind(), "Chat request failed: {}", e);
            crate::metrics::record_request("/api/chat", 500, e.kind(), elapsed);
        }
    }

    result.map(Json)
}

async fn relay_chat(state: &AppState, body: &[u8]) -> Result<ChatReply> {
    // Credential is checked before the body, as no work is possible without it.
    state.relay.ensure_configured()?;

    let request: ChatRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(
            "Rejected chat body (first 200 chars): {}",
            String::from_utf8_lossy(body).chars().take(200).collect::<String>()
        );
        RelayError::MalformedRequest(e.to_string())
    })?;

    info!("Received chat request: turns={}", request.messages.len());

    state.relay.respond(&request.messages).await
}

/// Handler for `GET /api/chat/suggestions`
pub async fn suggestions_handler(State(state): State<AppState>) -> Json<SuggestionsResponse> {
    let started = Instant::now();
    let response = SuggestionsResponse {
        greeting: state.portfolio.chat.greeting.clone(),
        suggested_questions: state.portfolio.chat.suggested_questions.clone(),
    };
    crate::metrics::record_request(
        "/api/chat/suggestions",
        200,
        "ok",
        started.elapsed().as_secs_f64(),
    );
    Json(response)
}

/// Handler for `GET /metrics`
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
