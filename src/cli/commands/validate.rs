//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use terminal_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Simulation mode: {}", config.trading.simulation_mode);
            println!("Auto trading: {}", config.trading.auto_trading_enabled);
            println!("Quote cache TTL: {}s", config.quotes.cache_ttl_secs);
            println!("Default period: {}", config.display.default_period);
            println!("Watchlist: {}", config.app.watchlist);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
