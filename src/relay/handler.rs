// Chat relay - credential check, cache lookup, fallback, cache write
// Author: kelexine (https://github.com/kelexine)

use super::candidates::ModelCandidates;
use super::sequencer::FallbackSequencer;
use crate::cache::{cache_key, ResponseCache};
use crate::error::{RelayError, Result};
use crate::models::{
    latest_user_message, ChatReply, ChatTurn, CompletionMessage, CompletionRequest, MessageRole,
};
use std::sync::Arc;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Sampling temperature sent with every attempt.
pub const TEMPERATURE: f64 = 0.4;
/// Output token cap sent with every attempt.
pub const MAX_TOKENS: u32 = 250;

/// Upstream bearer credential, wiped from memory on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// `None` for a missing or blank secret.
    pub fn from_option(secret: Option<String>) -> Option<Self> {
        secret
            .filter(|s| !s.trim().is_empty())
            .map(|s| Self(s.trim().to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Answers a visitor's conversation, from cache when possible.
pub struct ChatRelay {
    sequencer: FallbackSequencer,
    credential: Option<Credential>,
    system_prompt: String,
    cache: Arc<ResponseCache>,
}

impl ChatRelay {
    pub fn new(
        sequencer: FallbackSequencer,
        credential: Option<Credential>,
        system_prompt: String,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            sequencer,
            credential,
            system_prompt,
            cache,
        }
    }

    /// Fails before any network traffic when no credential is configured.
    pub fn ensure_configured(&self) -> Result<&str> {
        self.credential
            .as_ref()
            .map(Credential::expose)
            .ok_or_else(|| {
                RelayError::Configuration(format!(
                    "Missing {} for the upstream provider",
                    crate::config::TOKEN_ENV
                ))
            })
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn candidates(&self) -> &ModelCandidates {
        self.sequencer.candidates()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Upstream payload: the system preamble followed by the caller's turns.
    /// `model` is filled in per attempt.
    pub fn build_payload(&self, turns: &[ChatTurn]) -> CompletionRequest {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(CompletionMessage {
            role: MessageRole::System,
            content: self.system_prompt.clone(),
        });
        messages.extend(turns.iter().map(CompletionMessage::from));

        CompletionRequest {
            model: String::new(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    pub async fn respond(&self, turns: &[ChatTurn]) -> Result<ChatReply> {
        let credential = self.ensure_configured()?;

        // An empty key is legitimate: conversations without a user turn share it.
        let key = cache_key(latest_user_message(turns));

        if let Some(entry) = self.cache.get(&key) {
            info!(turns = turns.len(), "Serving reply from cache");
            return Ok(ChatReply::from_cache(entry.text));
        }

        debug!(
            turns = turns.len(),
            candidates = self.candidates().len(),
            "Cache miss, running model fallback"
        );

        let completion = self
            .sequencer
            .run(credential, &self.build_payload(turns))
            .await?;

        self.cache.set(&key, &completion.text);

        Ok(ChatReply::from_model(completion.text, completion.model))
    }
}
