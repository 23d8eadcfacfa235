//! Order entry command.

use anyhow::{bail, Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use terminal_config::AppConfig;
use terminal_core::traits::{OrderSide, OrderType};
use terminal_core::types::Symbol;
use terminal_data::{TradeRecord, TradeRecorder};
use terminal_gateway::{ExecutionEngine, LiveExecution, OrderReceipt, SimExecution};
use tracing::info;

use crate::cli::{OrderArgs, OrderSideArg};

pub async fn run(args: OrderArgs, config: &AppConfig) -> Result<()> {
    let symbol = Symbol::parse(&args.symbol).context("invalid symbol")?;
    let side = match args.side {
        OrderSideArg::Buy => OrderSide::Buy,
        OrderSideArg::Sell => OrderSide::Sell,
    };
    let (order_type, price) = match args.price {
        Some(p) => (
            OrderType::Limit,
            Some(Decimal::try_from(p).context("invalid price")?),
        ),
        None => (OrderType::Market, None),
    };

    let receipt = if config.trading.simulation_mode {
        SimExecution
            .place_order(&symbol, side, args.volume, order_type, price)
            .await?
    } else {
        let connection = super::build_connection(config);
        if !connection.connect().await {
            bail!("gateway not connected; cannot place a live order");
        }
        LiveExecution::new(connection)
            .place_order(&symbol, side, args.volume, order_type, price)
            .await?
    };

    print_receipt(&receipt);
    record_trade(&receipt, side, &args.name, config)?;

    Ok(())
}

fn print_receipt(receipt: &OrderReceipt) {
    let mode = if receipt.simulated { "Simulated" } else { "Live" };
    let price = receipt
        .price
        .map(|p| p.to_string())
        .unwrap_or_else(|| "market".to_string());
    println!(
        "{mode} order {}: {:?} {} x{} @ {price}",
        receipt.order_id, receipt.side, receipt.symbol, receipt.volume
    );
}

fn record_trade(
    receipt: &OrderReceipt,
    side: OrderSide,
    name: &str,
    config: &AppConfig,
) -> Result<()> {
    let price = receipt
        .price
        .and_then(|p| p.to_f64())
        .unwrap_or(0.0);

    let recorder = TradeRecorder::new(&config.app.trade_log);
    recorder.add(TradeRecord {
        time: receipt.submitted_at,
        code: receipt.symbol.clone(),
        name: name.to_string(),
        side,
        price,
        volume: receipt.volume,
        amount: price * receipt.volume as f64,
        simulated: receipt.simulated,
    })?;
    info!(path = %config.app.trade_log, "trade recorded");

    Ok(())
}
