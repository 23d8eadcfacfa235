//! Market data and signal types.

mod bar;
mod period;
mod quote;
mod signal;
mod symbol;

pub use bar::{Bar, BarSeries};
pub use period::Period;
pub use quote::{Quote, QuoteSource};
pub use signal::{Signal, SignalKind};
pub use symbol::{Exchange, Symbol};
