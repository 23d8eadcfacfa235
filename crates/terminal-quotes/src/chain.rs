//! Ordered provider chain: primary snapshot, gateway fallback.

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use terminal_core::traits::SnapshotProvider;
use terminal_core::types::{Quote, QuoteSource, Symbol};
use terminal_gateway::{run_bounded, GatewayConnection};
use tracing::{debug, warn};

const FALLBACK_QUOTE_TIMEOUT: Duration = Duration::from_secs(3);
const FALLBACK_HISTORY_TIMEOUT: Duration = Duration::from_secs(2);

/// Primary/fallback pair fetching quotes for a batch of symbols.
///
/// The primary answers one broad-market snapshot per call; the gateway's
/// live feed is consulted only when the primary yields nothing usable AND
/// the gateway is connected. Partial success is the contract: symbols
/// that resolve nowhere are simply absent from the result.
pub struct ProviderChain {
    primary: Arc<dyn SnapshotProvider>,
    gateway: Arc<GatewayConnection>,
}

impl ProviderChain {
    pub fn new(primary: Arc<dyn SnapshotProvider>, gateway: Arc<GatewayConnection>) -> Self {
        Self { primary, gateway }
    }

    /// Fetch quotes for a batch. Never errors; failures shrink the
    /// result instead of raising.
    pub async fn fetch(&self, symbols: &[Symbol]) -> HashMap<String, Quote> {
        if symbols.is_empty() {
            return HashMap::new();
        }

        let primary = self.fetch_primary(symbols).await;
        if !primary.is_empty() {
            return primary;
        }

        // No retry of the primary; straight to the fallback, gated on
        // gateway connectivity.
        if !self.gateway.is_connected() {
            warn!("primary yielded no usable rows and gateway is not connected");
            return HashMap::new();
        }
        self.fetch_fallback(symbols).await
    }

    async fn fetch_primary(&self, symbols: &[Symbol]) -> HashMap<String, Quote> {
        let rows = match self.primary.snapshot().await {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => {
                warn!(provider = self.primary.name(), "primary snapshot empty");
                return HashMap::new();
            }
            Err(e) => {
                warn!(provider = self.primary.name(), error = %e, "primary snapshot failed");
                return HashMap::new();
            }
        };

        let wanted: HashSet<&str> = symbols.iter().map(|s| s.code()).collect();
        let quotes: HashMap<String, Quote> = rows
            .into_iter()
            .filter(|row| wanted.contains(row.code.as_str()))
            .map(|row| {
                let quote = Quote::new(
                    row.code.clone(),
                    row.price,
                    row.change_percent,
                    row.turnover_rate,
                    QuoteSource::Primary,
                );
                (row.code, quote)
            })
            .collect();

        debug!(
            requested = symbols.len(),
            resolved = quotes.len(),
            provider = self.primary.name(),
            "primary snapshot filtered"
        );
        quotes
    }

    async fn fetch_fallback(&self, symbols: &[Symbol]) -> HashMap<String, Quote> {
        let code_by_qualified: HashMap<String, String> = symbols
            .iter()
            .map(|s| (s.qualified(), s.code().to_string()))
            .collect();
        let qualified: Vec<String> = code_by_qualified.keys().cloned().collect();

        let api = self.gateway.api();
        let batch = qualified.clone();
        let ticks = match run_bounded(FALLBACK_QUOTE_TIMEOUT, async move {
            api.live_quotes(&batch).await
        })
        .await
        .into_success()
        {
            Some(ticks) if !ticks.is_empty() => ticks,
            _ => {
                warn!("gateway live quotes unavailable");
                return HashMap::new();
            }
        };

        let mut result = HashMap::new();
        for tick in ticks {
            let Some(code) = code_by_qualified.get(&tick.symbol) else {
                continue;
            };

            let change_percent = self.derive_change_percent(&tick.symbol, tick.price).await;
            // Rough proxy; free-float share counts are not available over
            // this API.
            let turnover_rate = if tick.cum_volume > 0.0 {
                round2(tick.cum_volume / 10_000_000.0)
            } else {
                0.0
            };

            result.insert(
                code.clone(),
                Quote::new(
                    code.clone(),
                    tick.price,
                    change_percent,
                    turnover_rate,
                    QuoteSource::Fallback,
                ),
            );
        }

        debug!(
            requested = symbols.len(),
            resolved = result.len(),
            "gateway fallback fetched"
        );
        result
    }

    /// The live feed carries no change-percent; derive it from a
    /// previous-close baseline, or report 0 when none is obtainable.
    async fn derive_change_percent(&self, qualified: &str, price: f64) -> f64 {
        if price <= 0.0 {
            return 0.0;
        }
        match self.previous_close(qualified).await {
            Some(prev_close) if prev_close > 0.0 => {
                round2((price - prev_close) / prev_close * 100.0)
            }
            _ => {
                debug!(symbol = qualified, "no baseline close, reporting zero change");
                0.0
            }
        }
    }

    /// Baseline close: the prior session's dated daily history, widened
    /// to the second-most-recent of the last three sessions when that
    /// comes back empty.
    ///
    /// The baseline is NOT adjusted for corporate actions; around splits
    /// or dividends the derived change-percent is off. Known accuracy
    /// limitation, kept for compatibility.
    async fn previous_close(&self, qualified: &str) -> Option<f64> {
        let yesterday = (Utc::now() - chrono::Duration::days(1)).date_naive();
        let start = yesterday.and_hms_opt(9, 30, 0)?.and_utc();
        let end = yesterday.and_hms_opt(15, 0, 0)?.and_utc();

        let api = self.gateway.api();
        let symbol = qualified.to_string();
        if let Some(bars) = run_bounded(FALLBACK_HISTORY_TIMEOUT, async move {
            api.history(&symbol, "1d", start, end).await
        })
        .await
        .into_success()
        {
            if let Some(last) = bars.last() {
                if last.close > 0.0 {
                    return Some(last.close);
                }
            }
        }

        let api = self.gateway.api();
        let symbol = qualified.to_string();
        if let Some(bars) = run_bounded(FALLBACK_HISTORY_TIMEOUT, async move {
            api.history_n(&symbol, "1d", 3).await
        })
        .await
        .into_success()
        {
            if bars.len() >= 2 {
                let close = bars[bars.len() - 2].close;
                if close > 0.0 {
                    return Some(close);
                }
            }
        }

        None
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
