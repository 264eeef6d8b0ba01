//! Configuration for the exposure calculator

use serde::{Deserialize, Serialize};

/// Pricing and level-analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    /// Risk-free rate used by the pricing helpers
    /// Default: 0.05
    pub risk_free_rate: f64,

    /// |exposure| above this counts as a significant barrier
    /// Default: 0.7
    pub level_threshold: f64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            level_threshold: 0.7,
        }
    }
}
