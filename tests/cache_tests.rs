// Response cache tests - public API only
// Author: kelexine (https://github.com/kelexine)

use folio_relay::cache::{cache_key, ManualClock, ResponseCache, CACHE_TTL};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_cache_stats_initialization() {
    let cache = ResponseCache::default();
    let stats = cache.stats();

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.writes, 0);
    assert!(cache.is_empty());
}

#[test]
fn test_ttl_is_one_hour() {
    assert_eq!(CACHE_TTL, Duration::from_secs(3600));
}

#[test]
fn test_isolated_instances_do_not_share_entries() {
    let clock = Arc::new(ManualClock::new(0));
    let a = ResponseCache::new(clock.clone());
    let b = ResponseCache::new(clock);

    a.set(&cache_key("Hello"), "Hi from a");

    assert!(a.get("hello").is_some());
    assert!(b.get("hello").is_none());
}

#[test]
fn test_shared_cache_visible_across_threads() {
    let clock = Arc::new(ManualClock::new(0));
    let cache = Arc::new(ResponseCache::new(clock));

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let cache = cache.clone();
            std::thread::spawn(move || cache.set(&format!("q{}", i), "answer"))
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(cache.len(), 4);
    assert_eq!(cache.stats().writes, 4);
    assert!((0..4).all(|i| cache.get(&format!("q{}", i)).is_some()));
}

#[test]
fn test_last_writer_wins() {
    let clock = Arc::new(ManualClock::new(0));
    let cache = ResponseCache::new(clock.clone());

    cache.set("same question", "first answer");
    clock.advance(Duration::from_millis(5));
    cache.set("same question", "second answer");

    let entry = cache.get("same question").unwrap();
    assert_eq!(entry.text, "second answer");
    assert_eq!(entry.created_at_ms, 5);
}
