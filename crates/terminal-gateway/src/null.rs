//! Stand-in for a missing vendor SDK.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use terminal_core::error::GatewayError;
use terminal_core::traits::{CashInfo, GatewayApi, GatewayBar, LiveTick, OrderRequest, OrderTicket};

/// Gateway used when the vendor SDK is not installed or not importable.
///
/// Reports itself unavailable and fails every call with
/// [`GatewayError::Unavailable`], so the rest of the system degrades
/// instead of crashing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullGateway;

#[async_trait]
impl GatewayApi for NullGateway {
    fn available(&self) -> bool {
        false
    }

    async fn set_token(&self, _token: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn set_account_id(&self, _account_id: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn live_quotes(&self, _symbols: &[String]) -> Result<Vec<LiveTick>, GatewayError> {
        Err(GatewayError::Unavailable)
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
        Err(GatewayError::Unavailable)
    }

    async fn history_n(
        &self,
        _symbol: &str,
        _frequency: &str,
        _count: usize,
    ) -> Result<Vec<GatewayBar>, GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn place_order(&self, _request: &OrderRequest) -> Result<OrderTicket, GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn cancel_order(&self, _order_id: &str, _account_id: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn unfinished_orders(&self) -> Result<Vec<OrderTicket>, GatewayError> {
        Err(GatewayError::Unavailable)
    }
}
