//! Market Regime Segmentation
//!
//! Partitions a bar series into contiguous bull / bear / ranging spans using
//! the trailing mean return, and scores each span by how calm and how
//! directionally consistent it was.

mod segmenter;

pub use segmenter::*;

use serde::{Deserialize, Serialize};

/// Regime label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeKind {
    Bull,
    Bear,
    Ranging,
    /// Reserved for a between-regimes state; the return classifier never
    /// emits it
    Transition,
}

impl RegimeKind {
    pub fn label(&self) -> &'static str {
        match self {
            RegimeKind::Bull => "bull",
            RegimeKind::Bear => "bear",
            RegimeKind::Ranging => "ranging",
            RegimeKind::Transition => "transition",
        }
    }
}

/// Aggregates over a segment's span
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegimeCharacteristics {
    pub avg_return: f64,
    /// Mean of the rolling volatility over the span
    pub volatility: f64,
    /// Mean of the rolling volume average over the span
    pub avg_volume: f64,
}

/// Contiguous span of bars sharing a regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeSegment {
    pub kind: RegimeKind,
    pub start_idx: usize,
    /// Inclusive
    pub end_idx: usize,
    pub characteristics: RegimeCharacteristics,
    /// 0 to 1
    pub confidence: f64,
}

impl RegimeSegment {
    /// Number of bars covered
    pub fn bar_count(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }
}

/// Configuration for regime segmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    /// Trailing window for returns, volatility and volume
    /// Default: 20
    pub window: usize,

    /// Mean return above +threshold is bull, below -threshold is bear
    /// Default: 0.001
    pub return_threshold: f64,

    /// Added to the return std in the consistency score
    /// Default: 1e-4
    pub epsilon: f64,

    /// Rolling volatility is multiplied by this before it penalises
    /// confidence
    /// Default: 10.0
    pub volatility_scale: f64,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            window: 20,
            return_threshold: 0.001,
            epsilon: 1e-4,
            volatility_scale: 10.0,
        }
    }
}
