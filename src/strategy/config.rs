//! Configuration for signal generation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Target distance as a multiple of the stop distance
    /// Default: 2.0
    pub risk_reward_ratio: f64,

    /// Signals below this confidence are dropped
    /// Default: 0.6
    pub min_confidence: f64,

    /// Exposure signals fire only above this confidence
    /// Default: 0.6
    pub exposure_min_confidence: f64,

    /// Stop distance for exposure signals (fraction of entry)
    /// Default: 0.02
    pub exposure_stop: f64,

    /// Pattern signals fire only above this confidence
    /// Default: 0.6
    pub pattern_min_confidence: f64,

    /// Stop distance for pattern signals (fraction of entry)
    /// Default: 0.03
    pub pattern_stop: f64,

    /// Highest-confidence patterns considered
    /// Default: 3
    pub pattern_top_n: usize,

    /// Regime signals fire only above this segment confidence
    /// Default: 0.5
    pub regime_min_confidence: f64,

    /// Segment confidence is damped by this factor
    /// Default: 0.8
    pub regime_confidence_scale: f64,

    /// Stop distance for regime signals (fraction of entry)
    /// Default: 0.04
    pub regime_stop: f64,

    /// Target distance for regime signals (fraction of entry)
    /// Default: 0.05
    pub regime_target: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            risk_reward_ratio: 2.0,
            min_confidence: 0.6,
            exposure_min_confidence: 0.6,
            exposure_stop: 0.02,
            pattern_min_confidence: 0.6,
            pattern_stop: 0.03,
            pattern_top_n: 3,
            regime_min_confidence: 0.5,
            regime_confidence_scale: 0.8,
            regime_stop: 0.04,
            regime_target: 0.05,
        }
    }
}
