//! Real-time quote types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which provider in the chain produced a quote.
///
/// Propagates into the cache entry for observability and UI labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteSource {
    /// The external full-market snapshot provider.
    Primary,
    /// The vendor gateway's live feed.
    Fallback,
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSource::Primary => write!(f, "primary"),
            QuoteSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A point-in-time price snapshot for one instrument.
///
/// Immutable once constructed; a newer fetch supersedes it, it is never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Bare 6-digit instrument code.
    pub symbol: String,
    /// Last traded price.
    pub price: f64,
    /// Day change in percent.
    pub change_percent: f64,
    /// Turnover rate in percent.
    pub turnover_rate: f64,
    /// When the quote was observed.
    pub timestamp: DateTime<Utc>,
    /// Which provider produced it.
    pub source: QuoteSource,
}

impl Quote {
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        change_percent: f64,
        turnover_rate: f64,
        source: QuoteSource,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change_percent,
            turnover_rate,
            timestamp: Utc::now(),
            source,
        }
    }
}
