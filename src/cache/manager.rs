// Response cache - normalized question to reply, with lazy TTL expiry
// Author: kelexine (https://github.com/kelexine)

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::models::{CacheEntry, CacheStats};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Normalize a user message into its cache key.
pub fn cache_key(message: &str) -> String {
    message.trim().to_lowercase()
}

/// In-memory reply cache shared by every request for the life of the process.
///
/// Expired entries stay in the map until overwritten; readers treat them as
/// absent. The lock is never held across an await, and a lookup followed by a
/// write is not atomic: concurrent misses on one key both go upstream and the
/// last write wins.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    stats: Mutex<CacheStats>,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stats: Mutex::new(CacheStats::default()),
            clock,
        }
    }

    /// Look up a fresh entry for an already-normalized key.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = self.clock.now_ms();
        let hit = self
            .entries
            .lock()
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .cloned();

        let mut stats = self.stats.lock();
        if hit.is_some() {
            stats.hits += 1;
            crate::metrics::record_cache_hit();
            debug!(key_len = key.len(), "response cache hit");
        } else {
            stats.misses += 1;
            crate::metrics::record_cache_miss();
            debug!(key_len = key.len(), "response cache miss");
        }
        hit
    }

    /// Insert or overwrite the entry for `key`, stamped with the current time.
    pub fn set(&self, key: &str, text: &str) {
        let entry = CacheEntry {
            text: text.to_string(),
            created_at_ms: self.clock.now_ms(),
        };

        let count = {
            let mut entries = self.entries.lock();
            entries.insert(key.to_string(), entry);
            entries.len()
        };

        self.stats.lock().writes += 1;
        crate::metrics::record_cache_write();
        crate::metrics::update_cache_entries(count);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        crate::metrics::update_cache_entries(0);
        debug!("Response cache cleared");
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use crate::cache::models::CACHE_TTL;
    use std::time::Duration;

    fn cache_at(start: i64) -> (Arc<ManualClock>, ResponseCache) {
        let clock = Arc::new(ManualClock::new(start));
        let cache = ResponseCache::new(clock.clone());
        (clock, cache)
    }

    #[test]
    fn test_cache_key_normalization() {
        assert_eq!(cache_key("  What Stack Do You Use?\n"), "what stack do you use?");
        assert_eq!(cache_key(""), "");
        assert_eq!(cache_key("   "), "");
    }

    #[test]
    fn test_get_returns_fresh_entry() {
        let (clock, cache) = cache_at(1_000);
        cache.set("hello", "Hi!");
        clock.advance(Duration::from_secs(59 * 60));

        let entry = cache.get("hello").unwrap();
        assert_eq!(entry.text, "Hi!");
        assert_eq!(entry.created_at_ms, 1_000);
    }

    #[test]
    fn test_entry_expires_exactly_at_ttl() {
        let (clock, cache) = cache_at(0);
        cache.set("hello", "Hi!");

        clock.advance(CACHE_TTL - Duration::from_millis(1));
        assert!(cache.get("hello").is_some());

        clock.advance(Duration::from_millis(1));
        assert!(cache.get("hello").is_none());
        // Lazy expiry: the entry is still physically present.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_overwrites_and_restarts_ttl() {
        let (clock, cache) = cache_at(0);
        cache.set("k", "old");
        clock.advance(Duration::from_secs(50 * 60));
        cache.set("k", "new");
        clock.advance(Duration::from_secs(50 * 60));

        assert_eq!(cache.get("k").unwrap().text, "new");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats_and_clear() {
        let (_clock, cache) = cache_at(0);
        assert!(cache.get("missing").is_none());
        cache.set("k", "v");
        assert!(cache.get("k").is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
