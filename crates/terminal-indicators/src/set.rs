//! Named bundle of indicator series computed per chart update.

use crate::momentum::{Macd, MacdOutput, Rsi};
use crate::moving_average::Sma;
use std::collections::BTreeMap;
use terminal_core::traits::{Indicator, MultiOutputIndicator};

/// The moving-average windows the terminal charts by default.
pub const STANDARD_MA_WINDOWS: [usize; 4] = [5, 10, 20, 60];

/// Indicator series derived from one bar series.
///
/// Each series is warm-up trimmed: its values align to the END of the
/// source closes, and a series whose source was too short is simply
/// empty. The signal engine treats empty as "rule disabled".
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    ma: BTreeMap<usize, Vec<f64>>,
    macd: Vec<MacdOutput>,
    rsi: Vec<f64>,
}

impl IndicatorSet {
    /// Compute the standard set: MA 5/10/20/60, MACD(12,26,9), RSI(14).
    pub fn standard(closes: &[f64]) -> Self {
        Self::compute(closes, &STANDARD_MA_WINDOWS, Macd::new(), Rsi::new(14))
    }

    /// Compute with explicit parameters.
    pub fn compute(closes: &[f64], ma_windows: &[usize], macd: Macd, rsi: Rsi) -> Self {
        let mut ma = BTreeMap::new();
        for &window in ma_windows {
            ma.insert(window, Sma::new(window).calculate(closes));
        }

        Self {
            ma,
            macd: macd.calculate(closes),
            rsi: rsi.calculate(closes),
        }
    }

    /// Moving average series for a window, if computed and non-empty.
    pub fn ma(&self, window: usize) -> Option<&[f64]> {
        self.ma
            .get(&window)
            .filter(|s| !s.is_empty())
            .map(|s| s.as_slice())
    }

    /// MACD outputs (empty when the source was too short).
    pub fn macd(&self) -> &[MacdOutput] {
        &self.macd
    }

    /// RSI series (empty when the source was too short).
    pub fn rsi(&self) -> &[f64] {
        &self.rsi
    }

    /// Inject a precomputed MA series. Used by tests and by callers that
    /// already carry their own series.
    pub fn with_ma(mut self, window: usize, series: Vec<f64>) -> Self {
        self.ma.insert(window, series);
        self
    }

    /// Inject precomputed MACD outputs.
    pub fn with_macd(mut self, macd: Vec<MacdOutput>) -> Self {
        self.macd = macd;
        self
    }

    /// Inject a precomputed RSI series.
    pub fn with_rsi(mut self, rsi: Vec<f64>) -> Self {
        self.rsi = rsi;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_lengths() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let set = IndicatorSet::standard(&closes);

        assert_eq!(set.ma(5).unwrap().len(), closes.len() - 4);
        assert_eq!(set.ma(60).unwrap().len(), closes.len() - 59);
        assert!(!set.macd().is_empty());
        assert_eq!(set.rsi().len(), closes.len() - 14);
    }

    #[test]
    fn test_short_source_yields_empty_series() {
        let closes = vec![10.0, 10.1, 10.2];
        let set = IndicatorSet::standard(&closes);

        assert!(set.ma(5).is_none());
        assert!(set.macd().is_empty());
        assert!(set.rsi().is_empty());
    }
}
