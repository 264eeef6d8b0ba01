//! Option Greeks
//!
//! First and second order spot sensitivities, plus vega for the IV solver.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Vega: dV/dσ (raw, per 1.00 vol move)
    pub vega: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, vega: f64) -> Self {
        Self { delta, gamma, vega }
    }
}
