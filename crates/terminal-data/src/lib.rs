//! Historical bar acquisition and flat-file persistence.
//!
//! The [`BarStore`] pulls bars through the gateway connection; the
//! [`CsvBarSource`] loads the same shape from offline files. Watchlist
//! and trade-record files are small line/JSON stores edited by both the
//! terminal and, in the watchlist's case, the user's text editor.

pub mod bars;
pub mod csv_source;
pub mod recorder;
pub mod watchlist;

pub use bars::BarStore;
pub use csv_source::CsvBarSource;
pub use recorder::{TradeRecord, TradeRecorder};
pub use watchlist::Watchlist;
