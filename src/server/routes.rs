// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{chat_handler, health_handler, metrics_handler, suggestions_handler};
use super::middleware::{cors_layer, request_id_layers, MAX_BODY_BYTES};
use crate::config::AppConfig;
use crate::error::Result;
use crate::knowledge::PortfolioProfile;
use crate::relay::ChatRelay;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use zeroize::Zeroize;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub relay: Arc<ChatRelay>,
    pub portfolio: Arc<PortfolioProfile>,
}

impl AppState {
    /// Build shared state. The relay already owns its credential, so the
    /// plaintext token is wiped from the config before it is shared.
    pub fn new(mut config: AppConfig, relay: ChatRelay, portfolio: PortfolioProfile) -> Self {
        if let Some(mut token) = config.upstream.token.take() {
            token.zeroize();
        }
        Self {
            config: Arc::new(config),
            relay: Arc::new(relay),
            portfolio: Arc::new(portfolio),
        }
    }
}

pub fn create_router(
    config: AppConfig,
    relay: ChatRelay,
    portfolio: PortfolioProfile,
) -> Result<Router> {
    let cors = cors_layer(&config.server)?;
    let state = AppState::new(config, relay, portfolio);

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/suggestions", get(suggestions_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::relay::build_relay;
    use crate::upstream::HttpUpstream;

    #[test]
    fn test_state_does_not_keep_plaintext_token() {
        let mut config = AppConfig::default();
        config.upstream.token = Some("hf_supersecret123".to_string());
        let portfolio = PortfolioProfile::builtin().unwrap();
        let upstream = Arc::new(HttpUpstream::new(&config.upstream).unwrap());
        let relay = build_relay(&config, &portfolio, upstream, Arc::new(ResponseCache::default())).unwrap();

        let state = AppState::new(config, relay, portfolio);

        assert!(state.config.upstream.token.is_none());
        assert!(state.relay.has_credential());
        assert!(!format!("{:?}", state.config).contains("hf_supersecret123"));
    }
}
