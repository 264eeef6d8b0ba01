//! Configuration for pattern detection

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Series shorter than this produce no patterns
    /// Default: 2
    pub min_length: usize,

    /// Bars looked back for the recent high/low
    /// Default: 5
    pub level_lookback: usize,

    /// Close above `resistance_factor * recent_high` marks resistance
    /// Default: 0.95
    pub resistance_factor: f64,

    /// Close below `support_factor * recent_low` marks support
    /// Default: 1.05
    pub support_factor: f64,

    /// Trailing returns compared against the whole series
    /// Default: 10
    pub volatility_window: usize,

    /// Recent/overall dispersion ratio that flags a volatile period
    /// Default: 1.5
    pub volatility_multiplier: f64,

    /// Fixed confidence of volatility patterns
    /// Default: 0.7
    pub volatility_confidence: f64,

    /// Bars spanned by the trend comparison
    /// Default: 5
    pub trend_lookback: usize,

    /// Fixed confidence of trend patterns
    /// Default: 0.6
    pub trend_confidence: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_length: 2,
            level_lookback: 5,
            resistance_factor: 0.95,
            support_factor: 1.05,
            volatility_window: 10,
            volatility_multiplier: 1.5,
            volatility_confidence: 0.7,
            trend_lookback: 5,
            trend_confidence: 0.6,
        }
    }
}
