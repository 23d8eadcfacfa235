//! Order execution engines.
//!
//! One unified pass-through surface over the gateway: the simulated
//! engine fabricates fills locally, the live engine hands the order to
//! the vendor terminal. Which one runs is decided by the configured
//! trading mode.

use crate::bounded::run_bounded;
use crate::connection::GatewayConnection;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use terminal_core::error::GatewayError;
use terminal_core::types::Symbol;
use terminal_core::traits::{OrderRequest, OrderSide, OrderType};
use tracing::info;
use uuid::Uuid;

const ORDER_CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Result of submitting an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub volume: u32,
    /// Absent for market-style orders.
    pub price: Option<Decimal>,
    pub simulated: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Unified order entry point.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    async fn place_order(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        volume: u32,
        order_type: OrderType,
        price: Option<Decimal>,
    ) -> Result<OrderReceipt, GatewayError>;

    async fn cancel_order(&self, order_id: &str) -> Result<(), GatewayError>;
}

/// Simulated execution: every order fills immediately with a fabricated
/// id, nothing leaves the process.
#[derive(Debug, Default)]
pub struct SimExecution;

#[async_trait]
impl ExecutionEngine for SimExecution {
    async fn place_order(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        volume: u32,
        order_type: OrderType,
        price: Option<Decimal>,
    ) -> Result<OrderReceipt, GatewayError> {
        let order_id = format!("SIM-{}", Uuid::new_v4().simple());
        info!(
            symbol = %symbol,
            ?side,
            volume,
            ?order_type,
            ?price,
            order_id,
            "simulated order placed"
        );
        Ok(OrderReceipt {
            order_id,
            symbol: symbol.code().to_string(),
            side,
            volume,
            price,
            simulated: true,
            submitted_at: Utc::now(),
        })
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), GatewayError> {
        info!(order_id, "simulated order cancelled");
        Ok(())
    }
}

/// Live execution through the gateway connection.
pub struct LiveExecution {
    connection: Arc<GatewayConnection>,
}

impl LiveExecution {
    pub fn new(connection: Arc<GatewayConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ExecutionEngine for LiveExecution {
    async fn place_order(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        volume: u32,
        order_type: OrderType,
        price: Option<Decimal>,
    ) -> Result<OrderReceipt, GatewayError> {
        if !self.connection.is_connected() {
            return Err(GatewayError::NotConnected);
        }

        // Market-style orders carry no price.
        let price = match order_type {
            OrderType::Market => None,
            _ => price,
        };

        let request = OrderRequest {
            symbol: symbol.qualified(),
            side,
            volume,
            order_type,
            price,
            account_id: self.connection.account_id().to_string(),
        };

        let api = self.connection.api();
        let req = request.clone();
        let ticket = run_bounded(ORDER_CALL_TIMEOUT, async move {
            api.place_order(&req).await
        })
        .await
        .into_result(ORDER_CALL_TIMEOUT)?;

        info!(
            symbol = %request.symbol,
            ?side,
            volume,
            order_id = %ticket.order_id,
            "live order submitted"
        );

        Ok(OrderReceipt {
            order_id: ticket.order_id,
            symbol: symbol.code().to_string(),
            side,
            volume,
            price,
            simulated: false,
            submitted_at: ticket.created_at,
        })
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), GatewayError> {
        if !self.connection.is_connected() {
            return Err(GatewayError::NotConnected);
        }

        let api = self.connection.api();
        let account_id = self.connection.account_id().to_string();
        let id = order_id.to_string();
        run_bounded(ORDER_CALL_TIMEOUT, async move {
            api.cancel_order(&id, &account_id).await
        })
        .await
        .into_result(ORDER_CALL_TIMEOUT)?;

        info!(order_id, "live order cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::GatewayCredentials;
    use crate::null::NullGateway;

    #[tokio::test]
    async fn test_sim_orders_get_unique_ids() {
        let engine = SimExecution;
        let symbol = Symbol::parse("600000").unwrap();

        let a = engine
            .place_order(&symbol, OrderSide::Buy, 100, OrderType::Limit, None)
            .await
            .unwrap();
        let b = engine
            .place_order(&symbol, OrderSide::Sell, 200, OrderType::Market, None)
            .await
            .unwrap();

        assert!(a.simulated && b.simulated);
        assert!(a.order_id.starts_with("SIM-"));
        assert_ne!(a.order_id, b.order_id);
    }

    #[tokio::test]
    async fn test_live_refuses_when_disconnected() {
        let connection = Arc::new(GatewayConnection::new(
            Arc::new(NullGateway),
            GatewayCredentials::resolve(None, None),
        ));
        let engine = LiveExecution::new(connection);
        let symbol = Symbol::parse("000001").unwrap();

        let result = engine
            .place_order(&symbol, OrderSide::Buy, 100, OrderType::Limit, None)
            .await;
        assert!(matches!(result, Err(GatewayError::NotConnected)));

        let result = engine.cancel_order("X1").await;
        assert!(matches!(result, Err(GatewayError::NotConnected)));
    }
}
