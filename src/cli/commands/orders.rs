//! Session order listing command.

use anyhow::Result;
use terminal_config::AppConfig;

use crate::cli::OrdersArgs;

pub async fn run(args: OrdersArgs, config: &AppConfig) -> Result<()> {
    let connection = super::build_connection(config);
    connection.connect().await;

    let tickets = if args.open {
        connection.unfinished_orders().await?
    } else {
        connection.orders().await?
    };

    if tickets.is_empty() {
        println!("No orders.");
        return Ok(());
    }

    for ticket in &tickets {
        println!(
            "{}  {:?} {} x{}  filled {} @ {}  [{}]",
            ticket.order_id,
            ticket.side,
            ticket.symbol,
            ticket.volume,
            ticket.filled_volume,
            ticket.filled_vwap,
            ticket.status
        );
    }

    Ok(())
}
