//! Gateway connection lifecycle, bounded vendor calls, and order
//! pass-through.
//!
//! The vendor SDK talks to a locally-running trading terminal process and
//! any of its calls may hang when that process is absent. Everything in
//! this crate is built on [`bounded::run_bounded`] so a hung vendor call
//! can never freeze the caller.

pub mod bounded;
pub mod connection;
pub mod execution;
pub mod null;

pub use bounded::{run_bounded, Bounded};
pub use connection::{
    ConnectTimeouts, ConnectionState, FailureReason, GatewayConnection, GatewayCredentials,
};
pub use execution::{ExecutionEngine, LiveExecution, OrderReceipt, SimExecution};
pub use null::NullGateway;
