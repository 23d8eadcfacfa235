//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DisplayConfig, GatewayConfig, LoggingConfig, QuotesConfig,
    TradingConfig,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// The file is optional; every section has defaults. Environment
/// variables prefixed `TERMINAL` override it, `__` separating nesting
/// levels (`TERMINAL__TRADING__SIMULATION_MODE=false`).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("TERMINAL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
