//! # GEX Analyzer - Gamma Exposure Analytics
//!
//! Turns option-chain snapshots and historical price/volume series into
//! gamma-exposure analytics, chart and regime patterns, and ranked heuristic
//! trade signals.
//!
//! ## Key Components
//!
//! - **Exposure**: notional (`gamma * OI * strike`, signed by type) and
//!   distance-weighted exposure, plus Black-Scholes pricing, greeks and
//!   implied volatility
//! - **Patterns**: resistance / support / volatility / trend scans over OHLC bars
//! - **Regime**: contiguous bull / bear / ranging segments with confidence
//! - **Strategy**: fuses exposure, patterns and regimes into ranked signals
//! - **Scanner**: gamma walls, call/put flips and pin risk in a snapshot
//! - **Analysis**: request validation and the end-to-end facade
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gex_analyzer::prelude::*;
//! use serde_json::json;
//!
//! let report = GexAnalyzer::new()
//!     .analyze(&json!({
//!         "current_price": 100.0,
//!         "expiration_date": "2024-02-16",
//!         "options": [
//!             { "ticker": "SPY", "tipo": "CALL", "strike": 100.0, "gamma": 0.28, "oi": 12000 },
//!             { "ticker": "SPY", "tipo": "PUT", "strike": 100.0, "gamma": 0.15, "oi": 4000 }
//!         ]
//!     }))
//!     .unwrap();
//!
//! println!("{} ({:.0})", report.regime.label(), report.total_gex);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Fetch market data
//! - Execute or persist trades
//! - Replay signals against future prices (the backtest only checks signal
//!   construction)
//!
//! Components emit `tracing` events; installing a subscriber is left to the
//! binary or the caller.

pub mod analysis;
pub mod config;
pub mod core;
pub mod exposure;
pub mod models;
pub mod patterns;
pub mod regime;
pub mod scanner;
pub mod strategy;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        BarSeries, GexError, GexResult, Greeks, OhlcBar, OptionRecord, OptionType,
    };

    // Configuration
    pub use crate::config::{AnalyzerConfig, Limits};

    // Pricing
    pub use crate::models::{
        greeks as bs_greeks, implied_volatility, norm_cdf, norm_pdf, price as bs_price,
        value as bs_value, IvSolution, IvStatus, Valuation, ValuationStatus,
    };

    // Exposure
    pub use crate::exposure::{
        analyze_levels, compute_exposure, notional_exposures, ExposureCalculator, ExposureConfig,
        ExposureSnapshot, ExposureStatus, ExposureTotals, GammaRegime, LevelStats,
        NotionalSummary, StrikeExposure,
    };

    // Patterns and regimes
    pub use crate::patterns::{
        classify_pattern, detect_patterns, Pattern, PatternConfig, PatternDetector, PatternKind,
        Recommendation,
    };
    pub use crate::regime::{
        segment_regimes, RegimeConfig, RegimeKind, RegimeSegment, RegimeSegmenter,
    };

    // Signals
    pub use crate::strategy::{
        generate_signals, BacktestReport, Direction, SignalEngine, SignalSource, StrategyConfig,
        TradeSignal,
    };

    // Snapshot scanner
    pub use crate::scanner::{
        scan_snapshot, FlipKind, GammaFlip, GammaWall, PinRisk, ScannerConfig, SnapshotPatterns,
        SnapshotScanner, StrategySuggestion,
    };

    // Analysis
    pub use crate::analysis::{
        analyze, example_scenarios, health, AnalysisReport, AnalysisRequest, ExampleScenario,
        GexAnalyzer, HistoryReport,
    };
}

// Re-export main types at crate root
pub use crate::analysis::GexAnalyzer;
pub use crate::config::AnalyzerConfig;
pub use crate::core::{GexError, GexResult};
