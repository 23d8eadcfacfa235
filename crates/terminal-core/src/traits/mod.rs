//! Core traits for the trading terminal.

mod gateway;
mod indicator;
mod provider;

pub use gateway::{
    CashInfo, GatewayApi, GatewayBar, LiveTick, OrderRequest, OrderSide, OrderTicket, OrderType,
};
pub use indicator::{Indicator, MultiOutputIndicator};
pub use provider::{SnapshotProvider, SnapshotRow};
