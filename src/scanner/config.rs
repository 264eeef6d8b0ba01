//! Configuration for the wall/flip/pin scanner

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// |gex| / (mean + std) above this marks a wall
    /// Default: 2.5
    pub wall_threshold: f64,

    /// Largest single-strike share of total OI above this marks a pin
    /// Default: 0.2
    pub pin_oi_ratio: f64,

    /// Cap on gamma-trade and flip suggestion confidence
    /// Default: 0.95
    pub max_confidence: f64,

    /// Target/stop distance for gamma-trade and flip suggestions
    /// Default: 0.02
    pub trade_move: f64,

    /// Stop distance for wall suggestions
    /// Default: 0.03
    pub wall_stop: f64,

    /// Wall strength mapping to full confidence
    /// Default: 5.0
    pub wall_full_strength: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            wall_threshold: 2.5,
            pin_oi_ratio: 0.2,
            max_confidence: 0.95,
            trade_move: 0.02,
            wall_stop: 0.03,
            wall_full_strength: 5.0,
        }
    }
}

impl ScannerConfig {
    /// Aggressive settings: lower thresholds, more walls and pins
    pub fn aggressive() -> Self {
        Self {
            wall_threshold: 2.0,
            pin_oi_ratio: 0.15,
            ..Default::default()
        }
    }

    /// Conservative settings: higher thresholds, fewer walls and pins
    pub fn conservative() -> Self {
        Self {
            wall_threshold: 3.0,
            pin_oi_ratio: 0.3,
            ..Default::default()
        }
    }
}
