//! Trade record listing command.

use anyhow::Result;
use terminal_config::AppConfig;
use terminal_data::TradeRecorder;

use crate::cli::RecordsArgs;

pub async fn run(args: RecordsArgs, config: &AppConfig) -> Result<()> {
    let recorder = TradeRecorder::new(&config.app.trade_log);
    let records = recorder.recent(args.limit)?;

    if records.is_empty() {
        println!("No trade records.");
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {:?} {} {}  x{} @ {:.2}  [{}]",
            record.time.format("%Y-%m-%d %H:%M:%S"),
            record.side,
            record.code,
            record.name,
            record.volume,
            record.price,
            if record.simulated { "sim" } else { "live" }
        );
    }

    Ok(())
}
