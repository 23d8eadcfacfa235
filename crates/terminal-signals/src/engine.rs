//! Signal evaluation rules.

use terminal_core::types::{BarSeries, Signal, SignalKind};
use terminal_indicators::{IndicatorSet, STANDARD_MA_WINDOWS};
use tracing::debug;

/// Default minimum relative last-step move for a slope turn to count.
pub const DEFAULT_AMPLITUDE_THRESHOLD: f64 = 0.005;

/// Minimum usable MA points before a slope turn is trusted.
const MIN_MA_POINTS: usize = 6;

/// Minimum indicator points before the cross and band rules engage.
const MIN_MACD_POINTS: usize = 3;
const MIN_RSI_POINTS: usize = 3;

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// Stateless rule evaluator.
///
/// Every rule reads only the tail of its input series and appends
/// independently; one rule firing never suppresses another. The result
/// set is recomputed from scratch on each call.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    amplitude_threshold: f64,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self {
            amplitude_threshold: DEFAULT_AMPLITUDE_THRESHOLD,
        }
    }
}

impl SignalEngine {
    pub fn new(amplitude_threshold: f64) -> Self {
        Self {
            amplitude_threshold,
        }
    }

    /// Evaluate every rule against one symbol's series.
    ///
    /// A rule whose indicator series is still in warm-up (empty or too
    /// short) is silently disabled rather than an error.
    pub fn evaluate(&self, series: &BarSeries, indicators: &IndicatorSet) -> Vec<Signal> {
        let mut signals = Vec::new();
        let Some(last_bar) = series.last() else {
            return signals;
        };
        let index = series.len() - 1;
        let symbol = series.symbol.as_str();

        self.detect_ma_turns(symbol, index, last_bar.close, indicators, &mut signals);
        self.detect_ma_alignment(symbol, index, indicators, &mut signals);
        self.detect_macd_cross(symbol, index, indicators, &mut signals);
        self.detect_rsi_extremes(symbol, index, indicators, &mut signals);

        if !signals.is_empty() {
            debug!(symbol, count = signals.len(), "signals fired");
        }
        signals
    }

    /// MA slope reversals on the last three points of each window's
    /// series, gated by the price's side of MA60.
    fn detect_ma_turns(
        &self,
        symbol: &str,
        index: usize,
        close: f64,
        indicators: &IndicatorSet,
        signals: &mut Vec<Signal>,
    ) {
        let ma60_last = indicators.ma(60).and_then(|s| s.last().copied());

        for window in STANDARD_MA_WINDOWS {
            let Some(ma) = indicators.ma(window) else {
                continue;
            };
            if ma.len() < MIN_MA_POINTS {
                continue;
            }

            let r0 = ma[ma.len() - 3];
            let r1 = ma[ma.len() - 2];
            let r2 = ma[ma.len() - 1];

            // Discrete gradient over the tail: central difference for the
            // previous slope, forward difference for the latest.
            let prev_slope = (r2 - r0) / 2.0;
            let last_slope = r2 - r1;

            if r1 == 0.0 {
                continue;
            }
            let amplitude = (r2 - r1).abs() / r1;
            if amplitude <= self.amplitude_threshold {
                continue;
            }

            // An unknown trend (no MA60 yet) keeps the gate closed.
            let above_ma60 = ma60_last.is_some_and(|m| close > m);
            let below_ma60 = ma60_last.is_some_and(|m| close < m);

            if prev_slope < 0.0 && last_slope > 0.0 && above_ma60 {
                signals.push(Signal::new(symbol, SignalKind::MaBottomTurn { window }, index));
            } else if prev_slope > 0.0 && last_slope < 0.0 && below_ma60 {
                signals.push(Signal::new(symbol, SignalKind::MaTopTurn { window }, index));
            }
        }
    }

    /// Strict short-over-long ordering of the last MA5/MA10/MA20 values.
    fn detect_ma_alignment(
        &self,
        symbol: &str,
        index: usize,
        indicators: &IndicatorSet,
        signals: &mut Vec<Signal>,
    ) {
        let last = |window| -> Option<f64> { indicators.ma(window)?.last().copied() };
        let (Some(ma5), Some(ma10), Some(ma20)) = (last(5), last(10), last(20)) else {
            return;
        };

        if ma5 > ma10 && ma10 > ma20 {
            signals.push(Signal::new(symbol, SignalKind::MaBullAlignment, index));
        } else if ma5 < ma10 && ma10 < ma20 {
            signals.push(Signal::new(symbol, SignalKind::MaBearAlignment, index));
        }
    }

    /// MACD line crossing its signal line between the last two outputs.
    fn detect_macd_cross(
        &self,
        symbol: &str,
        index: usize,
        indicators: &IndicatorSet,
        signals: &mut Vec<Signal>,
    ) {
        let macd = indicators.macd();
        if macd.len() < MIN_MACD_POINTS {
            return;
        }

        let prev = &macd[macd.len() - 2];
        let last = &macd[macd.len() - 1];
        let prev_diff = prev.macd - prev.signal;
        let last_diff = last.macd - last.signal;

        if prev_diff <= 0.0 && last_diff > 0.0 {
            signals.push(Signal::new(symbol, SignalKind::MacdGoldenCross, index));
        } else if prev_diff >= 0.0 && last_diff < 0.0 {
            signals.push(Signal::new(symbol, SignalKind::MacdDeathCross, index));
        }
    }

    /// Fixed 70/30 RSI bands on the latest value.
    fn detect_rsi_extremes(
        &self,
        symbol: &str,
        index: usize,
        indicators: &IndicatorSet,
        signals: &mut Vec<Signal>,
    ) {
        let series = indicators.rsi();
        if series.len() < MIN_RSI_POINTS {
            return;
        }
        let rsi = series[series.len() - 1];

        if rsi > RSI_OVERBOUGHT {
            signals.push(Signal::new(symbol, SignalKind::RsiOverbought, index));
        } else if rsi < RSI_OVERSOLD {
            signals.push(Signal::new(symbol, SignalKind::RsiOversold, index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terminal_core::types::{Bar, Period};
    use terminal_indicators::MacdOutput;

    fn series_closing_at(close: f64) -> BarSeries {
        let mut series = BarSeries::new("600000".into(), Period::Daily);
        series.push(Bar::new(1, close, close, close, close, 1000.0));
        series
    }

    fn kinds(signals: &[Signal]) -> Vec<SignalKind> {
        signals.iter().map(|s| s.kind).collect()
    }

    fn out(macd: f64, signal: f64) -> MacdOutput {
        MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        }
    }

    /// Flat series ending in a dip then a partial recovery of the given
    /// relative size: falling previous slope, rising last slope.
    fn bottom_turn_ma(rel_move: f64) -> Vec<f64> {
        let base = 10.0;
        let dip = base * 0.99;
        vec![base, base, base, base, dip, dip * (1.0 + rel_move)]
    }

    #[test]
    fn test_bottom_turn_fires_above_threshold() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default()
            .with_ma(5, bottom_turn_ma(0.01))
            .with_ma(60, vec![9.0; 6]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert!(kinds(&signals).contains(&SignalKind::MaBottomTurn { window: 5 }));
        let turn = signals
            .iter()
            .find(|s| s.kind == SignalKind::MaBottomTurn { window: 5 })
            .unwrap();
        assert_eq!(turn.score, 0.6);
    }

    #[test]
    fn test_turn_at_or_below_threshold_is_ignored() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default()
            .with_ma(5, bottom_turn_ma(0.004))
            .with_ma(60, vec![9.0; 6]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert!(!kinds(&signals)
            .iter()
            .any(|k| matches!(k, SignalKind::MaBottomTurn { .. })));
    }

    #[test]
    fn test_bottom_turn_gated_out_below_ma60() {
        let engine = SignalEngine::default();
        // Same turn shape, but price sits under the long average.
        let set = IndicatorSet::default()
            .with_ma(5, bottom_turn_ma(0.01))
            .with_ma(60, vec![20.0; 6]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert!(!kinds(&signals)
            .iter()
            .any(|k| matches!(k, SignalKind::MaBottomTurn { .. })));
    }

    #[test]
    fn test_turn_without_ma60_stays_gated() {
        let engine = SignalEngine::default();
        // No MA60 means no trend reference, so neither turn may fire.
        let set = IndicatorSet::default().with_ma(5, bottom_turn_ma(0.01));
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert!(signals.is_empty());
    }

    #[test]
    fn test_top_turn_fires_below_ma60() {
        let engine = SignalEngine::default();
        let top: Vec<f64> = bottom_turn_ma(0.01).iter().map(|v| 20.0 - v).collect();
        let set = IndicatorSet::default()
            .with_ma(20, top)
            .with_ma(60, vec![15.0; 6]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        let turn = signals
            .iter()
            .find(|s| s.kind == SignalKind::MaTopTurn { window: 20 })
            .unwrap();
        assert_eq!(turn.score, 0.8);
    }

    #[test]
    fn test_short_ma_series_disables_turn_rule() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default().with_ma(5, vec![10.0, 9.9, 10.1, 10.3, 10.6]);
        let signals = engine.evaluate(&series_closing_at(10.6), &set);

        assert!(signals.is_empty());
    }

    #[test]
    fn test_bull_alignment() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default()
            .with_ma(5, vec![12.0; 6])
            .with_ma(10, vec![11.0; 6])
            .with_ma(20, vec![10.0; 6]);
        let signals = engine.evaluate(&series_closing_at(12.0), &set);

        assert!(kinds(&signals).contains(&SignalKind::MaBullAlignment));
    }

    #[test]
    fn test_equal_averages_are_not_aligned() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default()
            .with_ma(5, vec![10.0; 6])
            .with_ma(10, vec![10.0; 6])
            .with_ma(20, vec![9.0; 6]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert!(!kinds(&signals).contains(&SignalKind::MaBullAlignment));
        assert!(!kinds(&signals).contains(&SignalKind::MaBearAlignment));
    }

    #[test]
    fn test_macd_golden_cross_fires_once() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default()
            .with_macd(vec![out(-0.2, 0.0), out(-0.1, 0.0), out(0.1, 0.0)]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert_eq!(kinds(&signals), vec![SignalKind::MacdGoldenCross]);
        assert_eq!(signals[0].score, 0.8);
    }

    #[test]
    fn test_macd_death_cross() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default()
            .with_macd(vec![out(0.2, 0.0), out(0.1, 0.0), out(-0.1, 0.0)]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert_eq!(kinds(&signals), vec![SignalKind::MacdDeathCross]);
    }

    #[test]
    fn test_macd_short_series_disables_rule() {
        let engine = SignalEngine::default();
        // Two points cross, but the rule needs three to engage.
        let set = IndicatorSet::default().with_macd(vec![out(-0.1, 0.0), out(0.1, 0.0)]);
        let signals = engine.evaluate(&series_closing_at(10.0), &set);

        assert!(signals.is_empty());
    }

    #[test]
    fn test_rsi_bands() {
        let engine = SignalEngine::default();

        let hot = IndicatorSet::default().with_rsi(vec![50.0, 60.0, 75.3]);
        let signals = engine.evaluate(&series_closing_at(10.0), &hot);
        assert_eq!(kinds(&signals), vec![SignalKind::RsiOverbought]);

        let cold = IndicatorSet::default().with_rsi(vec![50.0, 40.0, 24.1]);
        let signals = engine.evaluate(&series_closing_at(10.0), &cold);
        assert_eq!(kinds(&signals), vec![SignalKind::RsiOversold]);

        let mid = IndicatorSet::default().with_rsi(vec![50.0, 52.0, 55.0]);
        assert!(engine.evaluate(&series_closing_at(10.0), &mid).is_empty());
    }

    #[test]
    fn test_rsi_short_series_disables_rule() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default().with_rsi(vec![80.0, 85.0]);

        assert!(engine.evaluate(&series_closing_at(10.0), &set).is_empty());
    }

    #[test]
    fn test_empty_series_yields_nothing() {
        let engine = SignalEngine::default();
        let series = BarSeries::new("600000".into(), Period::Daily);
        let set = IndicatorSet::default().with_rsi(vec![80.0]);

        assert!(engine.evaluate(&series, &set).is_empty());
    }

    #[test]
    fn test_rules_append_independently() {
        let engine = SignalEngine::default();
        let set = IndicatorSet::default()
            .with_ma(5, vec![12.0; 6])
            .with_ma(10, vec![11.0; 6])
            .with_ma(20, vec![10.0; 6])
            .with_rsi(vec![50.0, 60.0, 75.0])
            .with_macd(vec![out(-0.2, 0.0), out(-0.1, 0.0), out(0.1, 0.0)]);
        let signals = engine.evaluate(&series_closing_at(12.0), &set);

        let kinds = kinds(&signals);
        assert!(kinds.contains(&SignalKind::MaBullAlignment));
        assert!(kinds.contains(&SignalKind::MacdGoldenCross));
        assert!(kinds.contains(&SignalKind::RsiOverbought));
    }
}
