//! Configuration structures.

use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub trading: TradingConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
    /// Watchlist file path.
    pub watchlist: String,
    /// Trade record log path.
    pub trade_log: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trading-terminal".to_string(),
            environment: "development".to_string(),
            watchlist: "watchlist.txt".to_string(),
            trade_log: "trade_records.json".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Vendor gateway credentials.
///
/// Left empty, the public simulation-environment defaults apply.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    pub token: Option<String>,
    pub account_id: Option<String>,
}

/// Order routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Route orders to the simulated engine instead of the gateway.
    pub simulation_mode: bool,
    pub auto_trading_enabled: bool,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            simulation_mode: true,
            auto_trading_enabled: false,
        }
    }
}

/// Quote acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    pub cache_ttl_secs: u64,
    pub refresh_interval_secs: u64,
    /// Override for the primary snapshot endpoint.
    pub snapshot_url: Option<String>,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 5,
            refresh_interval_secs: 5,
            snapshot_url: None,
        }
    }
}

/// Chart and scan defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub default_period: String,
    pub bar_count: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_period: "15m".to_string(),
            bar_count: 120,
        }
    }
}
