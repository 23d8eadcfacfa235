//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "terminal")]
#[command(author, version, about = "A-share trading terminal core")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show quotes for symbols or the watchlist
    Quotes(QuotesArgs),
    /// Scan a symbol's bars for technical signals
    Signals(SignalsArgs),
    /// Probe the vendor gateway connection
    Connect,
    /// Place an order (simulated or live per configuration)
    Order(OrderArgs),
    /// List session orders from the gateway
    Orders(OrdersArgs),
    /// Manage the watchlist
    #[command(subcommand)]
    Watchlist(WatchlistAction),
    /// Show recent trade records
    Records(RecordsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct QuotesArgs {
    /// Symbols to quote (comma-separated 6-digit codes)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Use the configured watchlist
    #[arg(long)]
    pub watchlist: bool,

    /// Bypass the quote cache
    #[arg(long)]
    pub force_refresh: bool,

    /// Keep refreshing every N seconds; bare --watch uses the configured
    /// refresh interval
    #[arg(long)]
    pub watch: Option<Option<u64>>,
}

#[derive(clap::Args)]
pub struct SignalsArgs {
    /// Symbol (6-digit code)
    #[arg(short, long)]
    pub symbol: String,

    /// Bar period (1m, 5m, 15m, 60m, 1d); defaults to the configured one
    #[arg(short, long)]
    pub period: Option<String>,

    /// Number of bars to evaluate; defaults to the configured count
    #[arg(long)]
    pub count: Option<usize>,

    /// Offline CSV bar file instead of the gateway
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct OrderArgs {
    /// Symbol (6-digit code)
    #[arg(short, long)]
    pub symbol: String,

    /// Order direction
    #[arg(long)]
    pub side: OrderSideArg,

    /// Share volume
    #[arg(short, long)]
    pub volume: u32,

    /// Limit price; omitted means a market order
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Display name for the trade log
    #[arg(long, default_value = "")]
    pub name: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrderSideArg {
    Buy,
    Sell,
}

#[derive(clap::Args)]
pub struct OrdersArgs {
    /// Only open (unfinished) orders
    #[arg(long)]
    pub open: bool,
}

#[derive(Subcommand)]
pub enum WatchlistAction {
    /// List entries
    List,
    /// Add a code
    Add {
        code: String,
        #[arg(default_value = "")]
        name: String,
    },
    /// Remove a code
    Remove { code: String },
}

#[derive(clap::Args)]
pub struct RecordsArgs {
    /// Maximum records to show
    #[arg(long, default_value = "20")]
    pub limit: usize,
}
