//! Vendor gateway SDK boundary.
//!
//! The concrete SDK speaks to the vendor's locally-running trading
//! terminal; its wire protocol is out of scope here. Everything the core
//! needs from it is captured by [`GatewayApi`]. Availability of the SDK
//! is itself optional: an unavailable implementation reports
//! `available() == false` and fails every call, and the core degrades
//! instead of crashing.

use crate::error::GatewayError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the gateway's live-quote feed.
///
/// The live feed does not carry change-percent; callers derive it from a
/// historical previous-close lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveTick {
    /// Gateway-qualified symbol, e.g. `SHSE.600000`.
    pub symbol: String,
    /// Last traded price.
    pub price: f64,
    /// Cumulative session volume.
    pub cum_volume: f64,
}

/// Account cash snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashInfo {
    pub available: Decimal,
    pub total: Decimal,
}

/// A raw historical bar as the gateway returns it.
///
/// `eob` (end of bar) arrives in seconds, milliseconds or microseconds
/// depending on the gateway build; the bar store normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GatewayBar {
    /// Raw bar-end timestamp, unit unspecified.
    pub eob: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order pricing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Limit order at a stated price.
    Limit,
    /// Market order; no price attached.
    Market,
    /// Best counterparty price.
    CounterpartyBest,
    /// Best own-side price.
    OwnSideBest,
    /// Best-five levels, fill-and-kill.
    BestFiveFak,
}

/// A new-order request passed through to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Gateway-qualified symbol.
    pub symbol: String,
    pub side: OrderSide,
    pub volume: u32,
    pub order_type: OrderType,
    /// Absent for market orders.
    pub price: Option<Decimal>,
    pub account_id: String,
}

/// Gateway-side view of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTicket {
    pub order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub volume: u32,
    pub filled_volume: u32,
    pub filled_vwap: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// The vendor trading-gateway SDK surface consumed by the core.
///
/// Any of these calls may hang when the vendor terminal process is not
/// running; callers must wrap them in a bounded task.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Whether the SDK module is importable at all.
    fn available(&self) -> bool {
        true
    }

    async fn set_token(&self, token: &str) -> Result<(), GatewayError>;

    async fn set_account_id(&self, account_id: &str) -> Result<(), GatewayError>;

    /// Live quotes for a batch of qualified symbols.
    async fn live_quotes(&self, symbols: &[String]) -> Result<Vec<LiveTick>, GatewayError>;

    /// Account cash balance.
    async fn cash(&self) -> Result<CashInfo, GatewayError>;

    /// Historical bars for a dated range.
    async fn history(
        &self,
        symbol: &str,
        frequency: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<GatewayBar>, GatewayError>;

    /// Most recent `count` historical bars.
    async fn history_n(
        &self,
        symbol: &str,
        frequency: &str,
        count: usize,
    ) -> Result<Vec<GatewayBar>, GatewayError>;

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderTicket, GatewayError>;

    async fn cancel_order(&self, order_id: &str, account_id: &str) -> Result<(), GatewayError>;

    /// All orders of the current session.
    async fn orders(&self) -> Result<Vec<OrderTicket>, GatewayError>;

    /// Orders not yet fully filled or cancelled.
    async fn unfinished_orders(&self) -> Result<Vec<OrderTicket>, GatewayError>;
}
