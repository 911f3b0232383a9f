//! Short-TTL quote cache
//!
//! Keyed by uppercase symbol. Entries are superseded in place and never
//! explicitly deleted; a stale entry simply stops being served. Growth is
//! bounded by the set of symbols a session touches.

use crate::market::types::StockQuote;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    quote: StockQuote,
    fetched_at: Instant,
}

/// Concurrent symbol -> quote cache with a freshness TTL checked on read.
#[derive(Debug)]
pub struct QuoteCache {
    ttl: Duration,
    entries: DashMap<String, CacheEntry>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Return the cached quote for `symbol` if a fresh entry exists.
    /// Stale entries are left in place, not evicted.
    pub fn get(&self, symbol: &str) -> Option<StockQuote> {
        let key = symbol.to_uppercase();
        self.entries.get(&key).and_then(|entry| {
            if entry.fetched_at.elapsed() < self.ttl {
                Some(entry.quote.clone())
            } else {
                None
            }
        })
    }

    /// Upsert the entry for `symbol`, stamping it as fetched now.
    pub fn insert(&self, symbol: &str, quote: StockQuote) {
        self.entries.insert(
            symbol.to_uppercase(),
            CacheEntry {
                quote,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::demo;

    #[test]
    fn test_fresh_entry_returned() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        let quote = demo::generate("AAPL");
        cache.insert("AAPL", quote.clone());

        assert_eq!(cache.get("AAPL"), Some(quote));
    }

    #[test]
    fn test_key_case_normalized() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        cache.insert("aapl", demo::generate("AAPL"));

        assert!(cache.get("AAPL").is_some());
        assert!(cache.get("aApL").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stale_entry_not_served_but_retained() {
        let cache = QuoteCache::new(Duration::from_millis(10));
        cache.insert("MSFT", demo::generate("MSFT"));

        std::thread::sleep(Duration::from_millis(25));

        assert!(cache.get("MSFT").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_supersedes_in_place() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        cache.insert("SPY", demo::generate("SPY"));
        let second = demo::generate("SPY");
        cache.insert("SPY", second.clone());

        assert_eq!(cache.get("SPY"), Some(second));
        assert_eq!(cache.len(), 1);
    }
}
