//! Gateway-backed historical bars.

use std::sync::Arc;
use std::time::Duration;
use terminal_core::error::DataError;
use terminal_core::types::{Bar, BarSeries, Period, Symbol};
use terminal_gateway::{run_bounded, GatewayConnection};
use tracing::debug;

const HISTORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw stamps below this are seconds.
const SECONDS_CEILING: i64 = 100_000_000_000;
/// Raw stamps below this (and above the seconds ceiling) are already
/// milliseconds; above it, microseconds.
const MILLIS_CEILING: i64 = 100_000_000_000_000;

/// Fetches recent bars through the gateway connection.
///
/// No persistence: every fetch goes to the gateway. A disconnected
/// gateway degrades to an empty series so chart and scan paths can run
/// without data rather than fail.
pub struct BarStore {
    gateway: Arc<GatewayConnection>,
}

impl BarStore {
    pub fn new(gateway: Arc<GatewayConnection>) -> Self {
        Self { gateway }
    }

    /// The most recent `count` bars for one symbol and period, oldest
    /// first.
    pub async fn fetch(
        &self,
        symbol: &Symbol,
        period: Period,
        count: usize,
    ) -> Result<BarSeries, DataError> {
        let mut series = BarSeries::new(symbol.code().to_string(), period);

        if !self.gateway.is_connected() {
            debug!(symbol = %symbol.code(), "gateway disconnected, serving empty series");
            return Ok(series);
        }

        let api = self.gateway.api();
        let qualified = symbol.qualified();
        let frequency = period.gateway_frequency();
        let raw = run_bounded(HISTORY_TIMEOUT, async move {
            api.history_n(&qualified, frequency, count).await
        })
        .await
        .into_result(HISTORY_TIMEOUT)
        .map_err(|e| DataError::Provider(e.to_string()))?;

        let mut bars: Vec<Bar> = raw
            .iter()
            .map(|b| {
                Bar::new(
                    normalize_timestamp(b.eob),
                    b.open,
                    b.high,
                    b.low,
                    b.close,
                    b.volume,
                )
            })
            .collect();
        bars.sort_by_key(|b| b.timestamp);

        series.extend(bars);
        Ok(series)
    }
}

/// Normalize a raw bar-end stamp to Unix milliseconds.
///
/// The gateway reports seconds, milliseconds or microseconds depending on
/// its build; the magnitude disambiguates for any date this terminal will
/// ever chart.
pub fn normalize_timestamp(raw: i64) -> i64 {
    if raw < SECONDS_CEILING {
        raw * 1000
    } else if raw < MILLIS_CEILING {
        raw
    } else {
        raw / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use terminal_core::error::GatewayError;
    use terminal_core::traits::{
        CashInfo, GatewayApi, GatewayBar, LiveTick, OrderRequest, OrderTicket,
    };
    use terminal_gateway::GatewayCredentials;

    struct HistoryGateway {
        bars: Vec<GatewayBar>,
    }

    #[async_trait]
    impl GatewayApi for HistoryGateway {
        async fn set_token(&self, _token: &str) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn set_account_id(&self, _account_id: &str) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn live_quotes(&self, symbols: &[String]) -> Result<Vec<LiveTick>, GatewayError> {
            Ok(symbols
                .iter()
                .map(|s| LiveTick {
                    symbol: s.clone(),
                    price: 1.0,
                    cum_volume: 0.0,
                })
                .collect())
        }

        async fn cash(&self) -> Result<CashInfo, GatewayError> {
            Err(GatewayError::Unavailable)
        }

        async fn history(
            &self,
            _symbol: &str,
            _frequency: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<GatewayBar>, GatewayError> {
            Ok(self.bars.clone())
        }

        async fn history_n(
            &self,
            _symbol: &str,
            _frequency: &str,
            _count: usize,
        ) -> Result<Vec<GatewayBar>, GatewayError> {
            Ok(self.bars.clone())
        }

        async fn place_order(&self, _request: &OrderRequest) -> Result<OrderTicket, GatewayError> {
            Err(GatewayError::Unavailable)
        }

        async fn cancel_order(&self, _order_id: &str, _account_id: &str) -> Result<(), GatewayError> {
            Err(GatewayError::Unavailable)
        }

        async fn orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
            Ok(Vec::new())
        }

        async fn unfinished_orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
            Ok(Vec::new())
        }
    }

    fn gateway_bar(eob: i64, close: f64) -> GatewayBar {
        GatewayBar {
            eob,
            open: close,
            high: close,
            low: close,
            close,
            volume: 100.0,
        }
    }

    async fn connected_store(bars: Vec<GatewayBar>) -> BarStore {
        let connection = Arc::new(GatewayConnection::new(
            Arc::new(HistoryGateway { bars }),
            GatewayCredentials::resolve(None, None),
        ));
        assert!(connection.connect().await);
        BarStore::new(connection)
    }

    #[test]
    fn test_normalize_seconds_millis_micros() {
        assert_eq!(normalize_timestamp(1_700_000_000), 1_700_000_000_000);
        assert_eq!(normalize_timestamp(1_700_000_000_000), 1_700_000_000_000);
        assert_eq!(normalize_timestamp(1_700_000_000_000_000), 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_fetch_normalizes_and_sorts_mixed_units() {
        // Three bars in mixed units, delivered out of order.
        let store = connected_store(vec![
            gateway_bar(1_700_000_120_000, 10.2),
            gateway_bar(1_700_000_000, 10.0),
            gateway_bar(1_700_000_060_000_000, 10.1),
        ])
        .await;

        let symbol = Symbol::parse("600000").unwrap();
        let series = store.fetch(&symbol, Period::Minute1, 3).await.unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 10.1, 10.2]);
        assert_eq!(series.get(0).unwrap().timestamp, 1_700_000_000_000);
        assert_eq!(series.get(1).unwrap().timestamp, 1_700_000_060_000);
    }

    #[tokio::test]
    async fn test_disconnected_gateway_serves_empty_series() {
        let connection = Arc::new(GatewayConnection::new(
            Arc::new(HistoryGateway { bars: Vec::new() }),
            GatewayCredentials::resolve(None, None),
        ));
        let store = BarStore::new(connection);

        let symbol = Symbol::parse("600000").unwrap();
        let series = store.fetch(&symbol, Period::Daily, 100).await.unwrap();

        assert!(series.is_empty());
        assert_eq!(series.symbol, "600000");
    }

    #[tokio::test]
    async fn test_fetch_carries_period_and_symbol() {
        let store = connected_store(vec![gateway_bar(1_700_000_000, 7.5)]).await;
        let symbol = Symbol::parse("SZSE.000001").unwrap();

        let series = store.fetch(&symbol, Period::Minute15, 1).await.unwrap();
        assert_eq!(series.symbol, "000001");
        assert_eq!(series.period, Period::Minute15);
    }
}
