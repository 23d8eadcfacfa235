//! Technical indicators consumed by the signal engine.
//!
//! - Moving averages (SMA, EMA)
//! - Momentum (RSI, MACD)
//! - [`IndicatorSet`]: the named bundle of series computed per chart
//!   update and handed to the signal engine

pub mod momentum;
pub mod moving_average;
pub mod set;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use set::{IndicatorSet, STANDARD_MA_WINDOWS};
