//! Chart Pattern Detection over OHLC series
//!
//! Four independent scans run over a bar sequence:
//! - **Resistance**: close pushing into the recent high → bearish
//! - **Support**: close sitting on the recent low → bullish
//! - **Volatility**: recent return dispersion well above the series norm → neutral
//! - **Trend**: last close vs the close four bars earlier → bullish/bearish
//!
//! Results are concatenated and ranked by confidence.

mod config;
mod detector;

pub use config::*;
pub use detector::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::stats::clamp_or_zero;

/// Direction a pattern points in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Bullish,
    Bearish,
    Neutral,
    Divergence,
}

impl PatternKind {
    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::Bullish => "bullish",
            PatternKind::Bearish => "bearish",
            PatternKind::Neutral => "neutral",
            PatternKind::Divergence => "divergence",
        }
    }
}

/// Trading recommendation derived from a single pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

/// A detected pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    /// 0 to 100
    pub strength: f64,
    /// 0 to 1
    pub confidence: f64,
    pub start_idx: usize,
    /// Inclusive, >= start_idx
    pub end_idx: usize,
    pub description: String,
    /// Named numeric facts behind the detection
    pub signals: BTreeMap<String, f64>,
}

impl Pattern {
    /// Build a pattern, clamping strength to [0, 100] and confidence to [0, 1]
    pub fn new(
        kind: PatternKind,
        strength: f64,
        confidence: f64,
        start_idx: usize,
        end_idx: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            strength: clamp_or_zero(strength, 0.0, 100.0),
            confidence: clamp_or_zero(confidence, 0.0, 1.0),
            start_idx: start_idx.min(end_idx),
            end_idx,
            description: description.into(),
            signals: BTreeMap::new(),
        }
    }

    /// Attach a named numeric fact
    pub fn with_signal(mut self, name: &str, value: f64) -> Self {
        self.signals.insert(name.to_string(), value);
        self
    }

    /// Recommendation: strong when confidence > 0.8
    pub fn recommendation(&self) -> Recommendation {
        let strong = self.confidence > 0.8;
        match self.kind {
            PatternKind::Bullish if strong => Recommendation::StrongBuy,
            PatternKind::Bullish => Recommendation::Buy,
            PatternKind::Bearish if strong => Recommendation::StrongSell,
            PatternKind::Bearish => Recommendation::Sell,
            PatternKind::Neutral | PatternKind::Divergence => Recommendation::Neutral,
        }
    }
}

/// Pattern summary with its recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternClassification {
    pub kind: PatternKind,
    pub strength: f64,
    pub confidence: f64,
    pub description: String,
    pub signals: BTreeMap<String, f64>,
    pub recommendation: Recommendation,
}

/// Classify a pattern for display
pub fn classify_pattern(pattern: &Pattern) -> PatternClassification {
    PatternClassification {
        kind: pattern.kind,
        strength: pattern.strength,
        confidence: pattern.confidence,
        description: pattern.description.clone(),
        signals: pattern.signals.clone(),
        recommendation: pattern.recommendation(),
    }
}
