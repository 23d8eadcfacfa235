//! OHLCV bar types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::Period;

/// One OHLCV record for a fixed time period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar-end timestamp, Unix milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar-end timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Time-ordered bar container for one symbol and period.
///
/// Bars are ordered by timestamp ascending. Contiguity is NOT guaranteed:
/// market closures produce gaps and consumers must tolerate irregular
/// spacing.
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub symbol: String,
    pub period: Period,
    bars: VecDeque<Bar>,
    /// Maximum number of retained bars (0 = unlimited).
    capacity: usize,
}

impl BarSeries {
    pub fn new(symbol: String, period: Period) -> Self {
        Self {
            symbol,
            period,
            bars: VecDeque::new(),
            capacity: 0,
        }
    }

    /// Series that drops its oldest bar once `capacity` is reached.
    pub fn with_capacity(symbol: String, period: Period, capacity: usize) -> Self {
        Self {
            symbol,
            period,
            bars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, bar: Bar) {
        if self.capacity > 0 && self.bars.len() >= self.capacity {
            self.bars.pop_front();
        }
        self.bars.push_back(bar);
    }

    pub fn extend(&mut self, bars: impl IntoIterator<Item = Bar>) {
        for bar in bars {
            self.push(bar);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Extract close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract volumes, oldest first.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
