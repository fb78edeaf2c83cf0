// Model fallback sequencer
// Author: kelexine (https://github.com/kelexine)

use super::candidates::ModelCandidates;
use crate::error::{CandidateFailure, RelayError, Result};
use crate::models::{parse_completion, CompletionRequest, Extraction};
use crate::upstream::CompletionUpstream;
use crate::utils::logging::body_excerpt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Reply text used when a successful completion carries no usable text.
pub const FALLBACK_REPLY: &str = "I couldn't generate a response.";

/// A candidate's successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

/// Tries each candidate in order with the same payload until one succeeds.
///
/// Attempts are strictly sequential and each candidate gets exactly one
/// attempt. Only the most recent failure is kept.
pub struct FallbackSequencer {
    upstream: Arc<dyn CompletionUpstream>,
    candidates: ModelCandidates,
    sanitize_tokens: bool,
}

impl FallbackSequencer {
    pub fn new(upstream: Arc<dyn CompletionUpstream>, candidates: ModelCandidates) -> Self {
        Self {
            upstream,
            candidates,
            sanitize_tokens: true,
        }
    }

    /// Whether logged upstream bodies are scrubbed of credentials.
    pub fn sanitize_tokens(mut self, enabled: bool) -> Self {
        self.sanitize_tokens = enabled;
        self
    }

    pub fn candidates(&self) -> &ModelCandidates {
        &self.candidates
    }

    pub async fn run(&self, credential: &str, payload: &CompletionRequest) -> Result<Completion> {
        let mut last_error: Option<CandidateFailure> = None;

        for model in &self.candidates {
            let started = Instant::now();
            let attempt = self.upstream.send(credential, &payload.for_model(model)).await;
            let elapsed = started.elapsed().as_secs_f64();

            let failure = match attempt {
                Err(e) => {
                    crate::metrics::record_upstream_attempt(model, "transport", elapsed);
                    CandidateFailure {
                        status: None,
                        model: model.clone(),
                        raw: e.to_string(),
                    }
                }
                Ok(reply) if !reply.is_success() => {
                    crate::metrics::record_upstream_attempt(model, "http_error", elapsed);
                    CandidateFailure {
                        status: Some(reply.status),
                        model: model.clone(),
                        raw: reply.body,
                    }
                }
                Ok(reply) => match parse_completion(&reply.body) {
                    Ok(extraction) => {
                        crate::metrics::record_upstream_attempt(model, "success", elapsed);
                        let text = match extraction {
                            Extraction::Text(text) => text,
                            Extraction::Missing(why) => {
                                warn!(
                                    model = %model,
                                    "Completion had no usable text ({}), using fallback reply",
                                    why.as_str()
                                );
                                FALLBACK_REPLY.to_string()
                            }
                        };
                        info!(model = %model, elapsed_secs = elapsed, "Upstream completion succeeded");
                        return Ok(Completion {
                            text,
                            model: model.clone(),
                        });
                    }
                    Err(e) => {
                        crate::metrics::record_upstream_attempt(model, "malformed", elapsed);
                        debug!("Unparseable completion from {}: {}", model, e);
                        CandidateFailure {
                            status: Some(reply.status),
                            model: model.clone(),
                            raw: reply.body,
                        }
                    }
                },
            };

            warn!(
                model = %failure.model,
                status = ?failure.status,
                body = %body_excerpt(&failure.raw, self.sanitize_tokens),
                "Candidate failed, trying next"
            );
            last_error = Some(failure);
        }

        if let Some(failure) = &last_error {
            crate::metrics::record_fallback_exhausted(&failure.model);
        }

        Err(RelayError::AllCandidatesExhausted {
            tried: self.candidates.to_vec(),
            last_error,
        })
    }
}
