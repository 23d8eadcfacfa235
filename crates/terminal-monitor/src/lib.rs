//! Observability for the trading terminal.

mod logging;

pub use logging::setup_logging;
