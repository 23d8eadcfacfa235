//! Core types and traits for the trading terminal.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Symbol, Quote, Bar, BarSeries)
//! - Detection signal types
//! - The vendor gateway and snapshot provider boundaries
//! - The shared error taxonomy

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, GatewayError, TerminalError, TerminalResult};
pub use traits::*;
pub use types::*;
