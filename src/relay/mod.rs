//! The chat relay core.
//!
//! - `candidates`: the ordered, validated list of upstream model ids.
//! - `sequencer`: tries candidates one after another until one succeeds.
//! - `handler`: the [`ChatRelay`] tying credential check, response cache and
//!   fallback together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod candidates;
mod handler;
mod sequencer;

pub use candidates::ModelCandidates;
pub use handler::{ChatRelay, Credential, MAX_TOKENS, TEMPERATURE};
pub use sequencer::{Completion, FallbackSequencer, FALLBACK_REPLY};

use crate::cache::ResponseCache;
use crate::config::AppConfig;
use crate::error::Result;
use crate::knowledge::{system_prompt, PortfolioProfile};
use crate::upstream::CompletionUpstream;
use std::sync::Arc;

/// Wire a relay from configuration, a loaded profile and a shared cache.
pub fn build_relay(
    config: &AppConfig,
    portfolio: &PortfolioProfile,
    upstream: Arc<dyn CompletionUpstream>,
    cache: Arc<ResponseCache>,
) -> Result<ChatRelay> {
    let candidates = ModelCandidates::from_config(&config.upstream)?;
    let sequencer = FallbackSequencer::new(upstream, candidates)
        .sanitize_tokens(config.logging.sanitize_tokens);

    Ok(ChatRelay::new(
        sequencer,
        Credential::from_option(config.upstream.token.clone()),
        system_prompt(portfolio),
        cache,
    ))
}
