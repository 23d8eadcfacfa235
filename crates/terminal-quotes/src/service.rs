//! Quote service orchestration.

use crate::cache::QuoteCache;
use crate::chain::ProviderChain;
use std::collections::HashMap;
use std::sync::Arc;
use terminal_core::types::{Quote, Symbol};
use tracing::debug;

/// Serves each refresh cycle: cache where fresh, one batched provider
/// fetch for the rest.
///
/// Provider failures degrade to fewer symbols in the result; no error
/// crosses this boundary. Concurrent invocations may redundantly fetch
/// the same symbol; the cache's last-write-wins contract absorbs that.
pub struct QuoteService {
    cache: Arc<QuoteCache>,
    chain: ProviderChain,
}

impl QuoteService {
    pub fn new(cache: Arc<QuoteCache>, chain: ProviderChain) -> Self {
        Self { cache, chain }
    }

    /// Quotes for a symbol batch.
    ///
    /// With `force_refresh` the cache is bypassed for reads (every symbol
    /// is fetched) but still updated on write. Symbols that cannot be
    /// resolved are absent from the result.
    pub async fn get_quotes(
        &self,
        symbols: &[Symbol],
        force_refresh: bool,
    ) -> HashMap<String, Quote> {
        if symbols.is_empty() {
            return HashMap::new();
        }

        let mut result = HashMap::new();
        let mut needs_fetch = Vec::new();

        for symbol in symbols {
            if !force_refresh {
                if let Some(quote) = self.cache.get(symbol.code()) {
                    result.insert(symbol.code().to_string(), quote);
                    continue;
                }
            }
            needs_fetch.push(symbol.clone());
        }

        if needs_fetch.is_empty() {
            debug!(hits = result.len(), "all symbols served from cache");
            return result;
        }

        // One batched call for every miss, never per-symbol.
        let fetched = self.chain.fetch(&needs_fetch).await;
        for (code, quote) in fetched {
            self.cache.put(quote.clone());
            result.insert(code, quote);
        }

        debug!(
            requested = symbols.len(),
            fetched = needs_fetch.len(),
            resolved = result.len(),
            "refresh cycle served"
        );
        result
    }

    /// Drop every cached quote.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
