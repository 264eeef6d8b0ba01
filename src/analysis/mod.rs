//! End-to-end analysis
//!
//! [`GexAnalyzer`] ties the components together behind two entry points:
//! - **Snapshot**: an option-chain request → notional and weighted exposure,
//!   walls/flips/pins and strategy suggestions
//! - **History**: a bar series plus exposure totals → patterns, regimes and
//!   ranked trade signals

mod analyzer;
mod request;
mod scenarios;

pub use analyzer::*;
pub use request::*;
pub use scenarios::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exposure::{ExposureSnapshot, GammaRegime, NotionalSummary, StrikeExposure};
use crate::patterns::{Pattern, PatternClassification};
use crate::regime::RegimeSegment;
use crate::scanner::{SnapshotPatterns, StrategySuggestion};
use crate::strategy::{BacktestReport, TradeSignal};

/// Result of a snapshot analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Always "success"; failures are returned as errors
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub current_price: f64,
    pub expiration_date: String,
    /// Sum of notional exposure over all rows
    pub total_gex: f64,
    pub regime: GammaRegime,
    /// Per-row notional exposure, strike ascending
    pub strikes: Vec<StrikeExposure>,
    pub patterns: SnapshotPatterns,
    pub strategies: Vec<StrategySuggestion>,
    /// Distance-weighted view of the same rows
    pub weighted_exposure: ExposureSnapshot,
    pub summary: NotionalSummary,
    pub skipped_rows: usize,
}

/// Result of a history analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryReport {
    pub timestamp: DateTime<Utc>,
    /// Close of the last bar, used as the signal entry
    pub price: f64,
    pub patterns: Vec<Pattern>,
    pub classifications: Vec<PatternClassification>,
    pub regimes: Vec<RegimeSegment>,
    pub signals: Vec<TradeSignal>,
    /// None when no signal survived ranking
    pub backtest: Option<BacktestReport>,
}

/// Liveness report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// Crate health, unconditionally "healthy"
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
