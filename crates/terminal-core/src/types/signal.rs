//! Detection signal types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete signal kind the detection engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Moving-average slope turned from falling to rising.
    MaBottomTurn { window: usize },
    /// Moving-average slope turned from rising to falling.
    MaTopTurn { window: usize },
    /// MA5 > MA10 > MA20 strictly.
    MaBullAlignment,
    /// MA5 < MA10 < MA20 strictly.
    MaBearAlignment,
    /// MACD line crossed above its signal line.
    MacdGoldenCross,
    /// MACD line crossed below its signal line.
    MacdDeathCross,
    /// RSI above 70.
    RsiOverbought,
    /// RSI below 30.
    RsiOversold,
}

impl SignalKind {
    /// Fixed severity score, used purely for presentation emphasis.
    pub fn score(&self) -> f64 {
        match self {
            SignalKind::MaBottomTurn { window } | SignalKind::MaTopTurn { window } => {
                match window {
                    60 => 0.9,
                    20 => 0.8,
                    10 => 0.7,
                    _ => 0.6,
                }
            }
            SignalKind::MaBullAlignment | SignalKind::MaBearAlignment => 1.0,
            SignalKind::MacdGoldenCross | SignalKind::MacdDeathCross => 0.8,
            SignalKind::RsiOverbought | SignalKind::RsiOversold => 0.7,
        }
    }

    /// Human-readable label for chart annotation.
    pub fn label(&self) -> String {
        match self {
            SignalKind::MaBottomTurn { window } => format!("MA{window} bottom turn"),
            SignalKind::MaTopTurn { window } => format!("MA{window} top turn"),
            SignalKind::MaBullAlignment => "MA bull alignment".to_string(),
            SignalKind::MaBearAlignment => "MA bear alignment".to_string(),
            SignalKind::MacdGoldenCross => "MACD golden cross".to_string(),
            SignalKind::MacdDeathCross => "MACD death cross".to_string(),
            SignalKind::RsiOverbought => "RSI overbought".to_string(),
            SignalKind::RsiOversold => "RSI oversold".to_string(),
        }
    }

    /// Whether the signal argues for rising prices.
    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            SignalKind::MaBottomTurn { .. }
                | SignalKind::MaBullAlignment
                | SignalKind::MacdGoldenCross
                | SignalKind::RsiOversold
        )
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A scored, labeled detection result.
///
/// Produced, never mutated; the engine recomputes its result set from
/// scratch on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Bare instrument code.
    pub symbol: String,
    pub kind: SignalKind,
    /// Index into the evaluated series where the signal fired.
    pub index: usize,
    /// Severity score in (0, 1].
    pub score: f64,
}

impl Signal {
    pub fn new(symbol: impl Into<String>, kind: SignalKind, index: usize) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            index,
            score: kind.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(SignalKind::MaBottomTurn { window: 5 }.score(), 0.6);
        assert_eq!(SignalKind::MaTopTurn { window: 10 }.score(), 0.7);
        assert_eq!(SignalKind::MaBottomTurn { window: 20 }.score(), 0.8);
        assert_eq!(SignalKind::MaTopTurn { window: 60 }.score(), 0.9);
        assert_eq!(SignalKind::MaBullAlignment.score(), 1.0);
        assert_eq!(SignalKind::MacdGoldenCross.score(), 0.8);
        assert_eq!(SignalKind::RsiOversold.score(), 0.7);
    }

    #[test]
    fn test_direction() {
        assert!(SignalKind::MacdGoldenCross.is_bullish());
        assert!(!SignalKind::MacdDeathCross.is_bullish());
        assert!(SignalKind::RsiOversold.is_bullish());
        assert!(!SignalKind::RsiOverbought.is_bullish());
    }
}
