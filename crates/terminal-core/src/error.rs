//! Error types for the trading terminal.

use std::time::Duration;
use thiserror::Error;

/// Top-level terminal error.
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from the vendor trading gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The vendor SDK itself is not importable/installed.
    #[error("gateway SDK unavailable")]
    Unavailable,

    #[error("gateway not connected")]
    NotConnected,

    /// A bounded call exceeded its deadline. Distinct from an outright
    /// failure so callers can tell "terminal not running" from "bad
    /// credentials".
    #[error("gateway call timed out after {0:?}")]
    Timeout(Duration),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("order rejected: {0}")]
    OrderRejected(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("gateway API error: {0}")]
    Api(String),
}

/// Errors from market-data sources and stores.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("no data available for the requested range")]
    NoData,

    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for terminal operations.
pub type TerminalResult<T> = Result<T, TerminalError>;
