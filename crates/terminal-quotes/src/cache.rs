//! Short-lived per-symbol quote cache.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use terminal_core::types::Quote;

/// Default freshness window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

struct CacheEntry {
    quote: Quote,
    fetched_at: Instant,
}

/// Per-symbol map from code to (quote, fetch-time).
///
/// Freshness is evaluated at read time; nothing sweeps or proactively
/// evicts. A stale entry just sits there until the next successful fetch
/// overwrites it. Same-symbol races resolve last-write-wins.
///
/// Owned and injectable: construct one, share it behind an `Arc`. Never
/// a process-wide singleton, so tests can run isolated instances.
pub struct QuoteCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached quote for `code`, only if still fresh.
    pub fn get(&self, code: &str) -> Option<Quote> {
        let entries = self.entries.read().expect("quote cache lock poisoned");
        entries
            .get(code)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.quote.clone())
    }

    /// Store a quote, overwriting any previous entry and resetting its
    /// fetch-time to now.
    pub fn put(&self, quote: Quote) {
        let mut entries = self.entries.write().expect("quote cache lock poisoned");
        entries.insert(
            quote.symbol.clone(),
            CacheEntry {
                quote,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .expect("quote cache lock poisoned")
            .clear();
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.read().expect("quote cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
