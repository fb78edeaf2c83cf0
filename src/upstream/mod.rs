//! Upstream completion provider seam.
//!
//! The relay talks to the provider only through [`CompletionUpstream`], so
//! tests can substitute a scripted upstream and count calls.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod client;

pub use client::HttpUpstream;

use crate::error::Result;
use crate::models::CompletionRequest;
use async_trait::async_trait;

/// Status and body of one upstream response, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait CompletionUpstream: Send + Sync {
    /// Send one attempt. `Err` means no HTTP response was obtained at all.
    async fn send(&self, credential: &str, request: &CompletionRequest) -> Result<RawReply>;
}
