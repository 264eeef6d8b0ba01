//! GexAnalyzer - facade over every component, sharing one configuration

use chrono::Utc;
use serde_json::Value;

use crate::config::AnalyzerConfig;
use crate::core::{BarSeries, GexError, GexResult, OhlcBar};
use crate::exposure::{notional_exposures, ExposureCalculator, ExposureTotals, NotionalSummary};
use crate::patterns::{classify_pattern, PatternDetector};
use crate::regime::RegimeSegmenter;
use crate::scanner::SnapshotScanner;
use crate::strategy::SignalEngine;

use super::{AnalysisReport, AnalysisRequest, HistoryReport};

/// Runs snapshot and history analyses
///
/// Holds only configuration-derived components, so a shared instance can
/// serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct GexAnalyzer {
    config: AnalyzerConfig,
    calculator: ExposureCalculator,
    detector: PatternDetector,
    segmenter: RegimeSegmenter,
    engine: SignalEngine,
    scanner: SnapshotScanner,
}

impl GexAnalyzer {
    /// Create an analyzer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            calculator: ExposureCalculator::with_config(config.exposure.clone()),
            detector: PatternDetector::with_config(config.patterns.clone()),
            segmenter: RegimeSegmenter::with_config(config.regime.clone()),
            engine: SignalEngine::with_config(config.strategy.clone()),
            scanner: SnapshotScanner::with_config(config.scanner.clone()),
            config,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Validate and analyze a raw option-chain request
    pub fn analyze(&self, request: &Value) -> GexResult<AnalysisReport> {
        let request = AnalysisRequest::from_value(request, &self.config.limits)?;
        Ok(self.analyze_request(&request))
    }

    /// Analyze an already-validated request
    pub fn analyze_request(&self, request: &AnalysisRequest) -> AnalysisReport {
        let price = request.current_price;

        let mut strikes = notional_exposures(&request.records);
        let summary = NotionalSummary::from_exposures(&strikes);
        let regime = summary.regime();

        let patterns = self.scanner.scan(&strikes);
        let strategies = self.scanner.suggest(price, summary.total_gex, &patterns);

        let strike_values: Vec<f64> = request.records.iter().map(|r| r.strike).collect();
        let gammas: Vec<f64> = request.records.iter().map(|r| r.gamma).collect();
        let open_interest: Vec<f64> = request.records.iter().map(|r| r.open_interest).collect();
        let weighted_exposure =
            self.calculator
                .compute_exposure(price, &strike_values, &gammas, &open_interest);

        strikes.sort_by(|a, b| {
            a.strike
                .partial_cmp(&b.strike)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::info!(
            rows = summary.total_options,
            skipped = request.skipped_rows,
            total_gex = summary.total_gex,
            regime = regime.label(),
            walls = patterns.walls.len(),
            pins = patterns.pins.len(),
            "snapshot analyzed"
        );

        AnalysisReport {
            status: "success".to_string(),
            timestamp: Utc::now(),
            current_price: price,
            expiration_date: request.expiration_date.clone(),
            total_gex: summary.total_gex,
            regime,
            strikes,
            patterns,
            strategies,
            weighted_exposure,
            summary,
            skipped_rows: request.skipped_rows,
        }
    }

    /// Patterns, regimes and ranked signals for a bar series
    ///
    /// The last close is the signal entry price. Bars are validated and the
    /// series length is capped by `limits.max_bars`.
    pub fn analyze_history(
        &self,
        bars: &[OhlcBar],
        totals: &ExposureTotals,
    ) -> GexResult<HistoryReport> {
        let series = BarSeries::new(bars.to_vec(), self.config.limits.max_bars)?;
        let price = series
            .last_close()
            .ok_or_else(|| GexError::validation("bar series is empty"))?;
        let bars = series.bars();

        let patterns = self.detector.detect(bars);
        let classifications: Vec<_> = patterns.iter().map(classify_pattern).collect();
        let regimes = self.segmenter.segment(bars);
        let signals = self.engine.generate_signals(
            price,
            totals,
            Some(&patterns[..]),
            Some(&regimes[..]),
        )?;

        let backtest = if signals.is_empty() {
            None
        } else {
            Some(self.engine.backtest(bars, &signals)?)
        };

        tracing::info!(
            bars = bars.len(),
            patterns = patterns.len(),
            regimes = regimes.len(),
            signals = signals.len(),
            "history analyzed"
        );

        Ok(HistoryReport {
            timestamp: Utc::now(),
            price,
            patterns,
            classifications,
            regimes,
            signals,
            backtest,
        })
    }
}

/// Analyze a request with default configuration
pub fn analyze(request: &Value) -> GexResult<AnalysisReport> {
    GexAnalyzer::new().analyze(request)
}
