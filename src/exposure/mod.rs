//! Gamma Exposure
//!
//! Two distinct exposure quantities are computed from the same option rows:
//!
//! - **Weighted exposure**: `gamma * OI * weight`, where
//!   `weight = 1 / (1 + |strike - spot| / spot)`. Unsigned by option type,
//!   it measures how much gamma sits close to spot.
//! - **Notional exposure**: `gamma * OI * strike`, negated for puts. This is
//!   the dealer-positioning view consumed by the snapshot scanner.
//!
//! They answer different questions and are reported under separate names.

mod calculator;
mod config;
mod levels;
mod notional;

pub use calculator::*;
pub use config::*;
pub use levels::*;
pub use notional::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an exposure snapshot holds computed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureStatus {
    Computed,
    /// Empty or mismatched inputs; every value is zero
    InvalidInput,
}

/// Long/short/net aggregate of per-strike exposures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureTotals {
    /// Sum of positive exposures
    pub long: f64,
    /// Magnitude of the sum of negative exposures
    pub short: f64,
    /// long - short
    pub net: f64,
}

impl ExposureTotals {
    /// Aggregate a list of signed exposures
    pub fn from_values(values: &[f64]) -> Self {
        let long: f64 = values.iter().filter(|&&v| v > 0.0).sum();
        let short: f64 = values.iter().filter(|&&v| v < 0.0).sum::<f64>().abs();
        Self {
            long,
            short,
            net: long - short,
        }
    }
}

/// Weighted exposure for one strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedStrike {
    pub strike: f64,
    /// Spot-proximity weight in (0, 1]
    pub weight: f64,
    pub exposure: f64,
}

/// Result of a weighted exposure calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureSnapshot {
    pub spot: f64,
    pub strikes: Vec<WeightedStrike>,
    pub totals: ExposureTotals,
    pub status: ExposureStatus,
    pub generated_at: DateTime<Utc>,
}

impl ExposureSnapshot {
    /// All-zero snapshot for unusable inputs
    pub fn invalid(spot: f64) -> Self {
        Self {
            spot,
            strikes: Vec::new(),
            totals: ExposureTotals::default(),
            status: ExposureStatus::InvalidInput,
            generated_at: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ExposureStatus::Computed
    }

    /// Per-strike exposure values in input order
    pub fn exposures(&self) -> Vec<f64> {
        self.strikes.iter().map(|s| s.exposure).collect()
    }
}
