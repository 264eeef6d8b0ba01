//! Strategy Signal Engine
//!
//! Fuses three independent evidence sources into ranked trade signals:
//! - **Exposure**: dominance of long over short weighted exposure (or vice versa)
//! - **Pattern**: the strongest directional chart patterns
//! - **Regime**: the most recent market regime
//!
//! Signals from different sources are not deduplicated; a caller sees every
//! source that agreed with a direction.

mod config;
mod engine;

pub use config::*;
pub use engine::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
    Neutral,
}

impl Direction {
    /// +1 long, -1 short, 0 neutral
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
            Direction::Neutral => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
            Direction::Neutral => "NEUTRAL",
        }
    }
}

/// Evidence source behind a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Exposure,
    Pattern,
    Regime,
}

/// A ranked trade signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub direction: Direction,
    /// 0 to 1
    pub confidence: f64,
    /// None for neutral signals
    pub entry: Option<f64>,
    pub stop: Option<f64>,
    pub target: Option<f64>,
    pub rationale: String,
    pub source: SignalSource,
    pub generated_at: DateTime<Utc>,
}

impl TradeSignal {
    /// Directional signal with stop and target at fractional distances from
    /// entry. The stop sits against the direction, the target with it.
    pub fn directional(
        direction: Direction,
        confidence: f64,
        entry: f64,
        stop_distance: f64,
        target_distance: f64,
        source: SignalSource,
        rationale: impl Into<String>,
    ) -> Self {
        let sign = direction.sign();
        let has_levels = direction != Direction::Neutral;
        Self {
            direction,
            confidence: crate::core::stats::clamp_or_zero(confidence, 0.0, 1.0),
            entry: has_levels.then_some(entry),
            stop: has_levels.then(|| entry * (1.0 - sign * stop_distance)),
            target: has_levels.then(|| entry * (1.0 + sign * target_distance)),
            rationale: rationale.into(),
            source,
            generated_at: Utc::now(),
        }
    }

    /// Fractional move from entry to target in the signal's favour
    pub fn expected_return(&self) -> Option<f64> {
        match (self.entry, self.target) {
            (Some(entry), Some(target)) if entry > 0.0 => {
                Some(self.direction.sign() * (target - entry) / entry)
            }
            _ => None,
        }
    }
}

/// Outcome of [`SignalEngine::backtest`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub avg_return: f64,
    pub total_return: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_levels() {
        let long = TradeSignal::directional(
            Direction::Long,
            0.9,
            100.0,
            0.02,
            0.04,
            SignalSource::Exposure,
            "long",
        );
        assert!((long.stop.unwrap() - 98.0).abs() < 1e-9);
        assert!((long.target.unwrap() - 104.0).abs() < 1e-9);
        assert!((long.expected_return().unwrap() - 0.04).abs() < 1e-12);

        let short = TradeSignal::directional(
            Direction::Short,
            0.9,
            100.0,
            0.02,
            0.04,
            SignalSource::Exposure,
            "short",
        );
        assert!((short.stop.unwrap() - 102.0).abs() < 1e-9);
        assert!((short.target.unwrap() - 96.0).abs() < 1e-9);
        assert!((short.expected_return().unwrap() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_neutral_has_no_levels() {
        let s = TradeSignal::directional(
            Direction::Neutral,
            1.7,
            100.0,
            0.02,
            0.04,
            SignalSource::Regime,
            "flat",
        );
        assert_eq!(s.confidence, 1.0);
        assert!(s.entry.is_none() && s.stop.is_none() && s.target.is_none());
        assert!(s.expected_return().is_none());
    }
}
