//! Snapshot Wall / Flip / Pin Scanner
//!
//! Works on the notional exposures of one option-chain snapshot:
//! - **Walls**: strikes whose |gex| stands far above the cross-strike norm
//! - **Flips**: call-side and put-side notional exposure of opposite sign
//! - **Pins**: a single strike holding an outsized share of open interest
//!
//! Each finding maps to a fixed-rule strategy suggestion.

mod config;
mod detection;
mod detector;
mod suggestions;

pub use config::*;
pub use detection::*;
pub use detector::*;
pub use suggestions::*;

use serde::{Deserialize, Serialize};

use crate::core::OptionType;
use crate::strategy::Direction;

/// Strike with concentrated notional exposure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaWall {
    pub strike: f64,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// |gex| / (mean + std)
    pub strength: f64,
    pub gex: f64,
}

/// Which way the call/put imbalance leans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipKind {
    /// Calls positive, puts negative
    #[serde(rename = "Bearish Flip")]
    Bearish,
    /// Calls negative, puts positive
    #[serde(rename = "Bullish Flip")]
    Bullish,
}

impl FlipKind {
    pub fn label(&self) -> &'static str {
        match self {
            FlipKind::Bearish => "Bearish Flip",
            FlipKind::Bullish => "Bullish Flip",
        }
    }

    /// Direction a flip suggestion trades
    pub fn direction(&self) -> Direction {
        match self {
            FlipKind::Bearish => Direction::Short,
            FlipKind::Bullish => Direction::Long,
        }
    }
}

/// Call/put sign inversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaFlip {
    #[serde(rename = "type")]
    pub kind: FlipKind,
    /// |calls + puts| / (|calls| + |puts|), 0 to 1
    pub strength: f64,
    pub call_gex: f64,
    pub put_gex: f64,
}

/// Open-interest concentration at one strike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRisk {
    pub strike: f64,
    pub oi: f64,
    pub oi_ratio: f64,
    pub strength: f64,
}

/// Everything the scanner found in one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPatterns {
    pub walls: Vec<GammaWall>,
    pub flips: Vec<GammaFlip>,
    pub pins: Vec<PinRisk>,
}

impl SnapshotPatterns {
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.flips.is_empty() && self.pins.is_empty()
    }
}

/// Heuristic trade idea derived from a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySuggestion {
    pub strategy_name: String,
    pub direction: Direction,
    pub description: String,
    /// 0 to 1
    pub confidence: f64,
    /// None for neutral suggestions
    pub entry_price: Option<f64>,
    pub target_price: f64,
    pub stop_loss: Option<f64>,
}
