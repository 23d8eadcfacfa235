//! Signal scan command.

use anyhow::{bail, Context, Result};
use terminal_config::AppConfig;
use terminal_core::types::{Period, Symbol};
use terminal_data::{BarStore, CsvBarSource};
use terminal_indicators::IndicatorSet;
use terminal_signals::SignalEngine;
use tracing::info;

use crate::cli::SignalsArgs;

pub async fn run(args: SignalsArgs, config: &AppConfig) -> Result<()> {
    let symbol = Symbol::parse(&args.symbol).context("invalid symbol")?;
    let period: Period = args
        .period
        .as_deref()
        .unwrap_or(&config.display.default_period)
        .parse()
        .context("invalid period")?;

    let count = args.count.unwrap_or(config.display.bar_count);

    let series = match &args.csv {
        Some(path) => CsvBarSource::new(path)?.load(symbol.code(), period)?,
        None => {
            let connection = super::build_connection(config);
            if !connection.connect().await {
                bail!("gateway not connected; provide --csv for offline bars");
            }
            BarStore::new(connection)
                .fetch(&symbol, period, count)
                .await?
        }
    };

    if series.is_empty() {
        bail!("no bars to evaluate for {}", symbol.code());
    }
    info!(bars = series.len(), %period, "evaluating signals");

    let indicators = IndicatorSet::standard(&series.closes());
    let signals = SignalEngine::default().evaluate(&series, &indicators);

    println!(
        "{} {} bars for {}",
        series.len(),
        period,
        symbol.qualified()
    );
    if signals.is_empty() {
        println!("No signals.");
    } else {
        for signal in &signals {
            let direction = if signal.kind.is_bullish() {
                "bullish"
            } else {
                "bearish"
            };
            println!("  [{:.1}] {} ({direction})", signal.score, signal.kind.label());
        }
    }

    Ok(())
}
