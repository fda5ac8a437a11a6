//! In-process quote cache with a single TTL.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::models::Quote;

/// TTL cache keyed by ticker. Entries expire lazily on read.
pub struct QuoteCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, (Instant, Quote)>>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached quote for `symbol` if it has not expired.
    pub fn get(&self, symbol: &str) -> Option<Quote> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(symbol)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, quote)| quote.clone())
    }

    pub fn insert(&self, quote: Quote) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(quote.symbol.clone(), (Instant::now(), quote));
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}
