//! Trading terminal CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use terminal_config::load_config;
use terminal_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    // Setup logging
    let log_level = match cli.log_level {
        cli::LogLevel::Trace => "trace",
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    let log_file = config.logging.file.as_deref().map(Path::new);
    let _log_guard = setup_logging(log_level, cli.json_logs, log_file);

    // Execute command
    match cli.command {
        Commands::Quotes(args) => cli::commands::quotes::run(args, &config).await,
        Commands::Signals(args) => cli::commands::signals::run(args, &config).await,
        Commands::Connect => cli::commands::connect::run(&config).await,
        Commands::Order(args) => cli::commands::order::run(args, &config).await,
        Commands::Orders(args) => cli::commands::orders::run(args, &config).await,
        Commands::Watchlist(action) => cli::commands::watch::run(action, &config).await,
        Commands::Records(args) => cli::commands::records::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
