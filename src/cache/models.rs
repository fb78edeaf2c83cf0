//! Response cache entry and statistics models.

// Author: kelexine (https://github.com/kelexine)

use serde::Serialize;
use std::time::Duration;

/// Fixed lifetime of a cached reply.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// A cached reply and the wall-clock time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub text: String,
    pub created_at_ms: i64,
}

impl CacheEntry {
    /// Whether the entry is still inside the TTL window at `now_ms`.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms - self.created_at_ms < CACHE_TTL.as_millis() as i64
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing, or only an expired entry.
    pub misses: u64,
    /// Entries inserted or overwritten.
    pub writes: u64,
}
