//! Quote table command.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use terminal_config::AppConfig;
use terminal_core::types::{Quote, Symbol};
use terminal_data::Watchlist;
use terminal_quotes::{EastmoneySpot, ProviderChain, QuoteCache, QuoteService};
use tracing::info;

use crate::cli::QuotesArgs;

pub async fn run(args: QuotesArgs, config: &AppConfig) -> Result<()> {
    let symbols = resolve_symbols(&args, config)?;
    if symbols.is_empty() {
        bail!("no symbols to quote: pass --symbols or populate the watchlist");
    }

    let provider = Arc::new(match &config.quotes.snapshot_url {
        Some(url) => EastmoneySpot::with_base_url(url.clone())?,
        None => EastmoneySpot::new()?,
    });

    let connection = super::build_connection(config);
    connection.connect().await;

    let cache = Arc::new(QuoteCache::new(Duration::from_secs(
        config.quotes.cache_ttl_secs,
    )));
    let service = QuoteService::new(cache, ProviderChain::new(provider, connection));

    match args.watch {
        Some(secs) => {
            let secs = secs.unwrap_or(config.quotes.refresh_interval_secs);
            let interval = Duration::from_secs(secs.max(1));
            info!(every = ?interval, "watching quotes, Ctrl-C to stop");
            loop {
                let quotes = service.get_quotes(&symbols, args.force_refresh).await;
                print_quotes(&quotes, &symbols);
                tokio::time::sleep(interval).await;
            }
        }
        None => {
            let quotes = service.get_quotes(&symbols, args.force_refresh).await;
            print_quotes(&quotes, &symbols);
        }
    }

    Ok(())
}

fn resolve_symbols(args: &QuotesArgs, config: &AppConfig) -> Result<Vec<Symbol>> {
    if args.watchlist || args.symbols.is_empty() {
        let list = Watchlist::load(&config.app.watchlist)?;
        return Ok(list.symbols());
    }

    args.symbols
        .iter()
        .map(|s| Symbol::parse(s).with_context(|| format!("invalid symbol '{s}'")))
        .collect()
}

fn print_quotes(quotes: &HashMap<String, Quote>, symbols: &[Symbol]) {
    println!(
        "{:<8} {:>10} {:>8} {:>8}  {}",
        "code", "price", "chg%", "turn%", "source"
    );
    for symbol in symbols {
        match quotes.get(symbol.code()) {
            Some(q) => println!(
                "{:<8} {:>10.2} {:>8.2} {:>8.2}  {}",
                q.symbol, q.price, q.change_percent, q.turnover_rate, q.source
            ),
            None => println!("{:<8} {:>10}", symbol.code(), "-"),
        }
    }
}
