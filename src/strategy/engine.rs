//! SignalEngine - evaluates each evidence source and ranks the union

use crate::core::{GexError, GexResult, OhlcBar};
use crate::exposure::ExposureTotals;
use crate::patterns::{Pattern, PatternKind};
use crate::regime::{RegimeKind, RegimeSegment};

use super::{BacktestReport, Direction, SignalSource, StrategyConfig, TradeSignal};

/// Guards the dominance ratio against an empty opposing side
const RATIO_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    config: StrategyConfig,
}

impl SignalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Generate signals from exposure totals and, when given, patterns and
    /// regimes
    ///
    /// The result holds only signals at or above `min_confidence`, ordered by
    /// confidence descending. Ties keep evaluator order: exposure, pattern,
    /// regime.
    pub fn generate_signals(
        &self,
        price: f64,
        totals: &ExposureTotals,
        patterns: Option<&[Pattern]>,
        regimes: Option<&[RegimeSegment]>,
    ) -> GexResult<Vec<TradeSignal>> {
        if !price.is_finite() || price <= 0.0 {
            return Err(GexError::invalid_input(format!(
                "signal price must be positive and finite, got {}",
                price
            )));
        }

        let mut signals = Vec::new();
        signals.extend(self.exposure_signal(price, totals));
        if let Some(patterns) = patterns {
            signals.extend(self.pattern_signals(price, patterns));
        }
        if let Some(regimes) = regimes {
            signals.extend(self.regime_signal(price, regimes));
        }

        let generated = signals.len();
        signals.retain(|s| s.confidence >= self.config.min_confidence);
        signals.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(generated, kept = signals.len(), "signals ranked");
        Ok(signals)
    }

    fn exposure_signal(&self, price: f64, totals: &ExposureTotals) -> Option<TradeSignal> {
        let (direction, confidence, rationale) = if totals.net > 0.0 {
            (
                Direction::Long,
                (totals.long / (totals.short + RATIO_EPSILON)).min(1.0),
                format!(
                    "Long exposure dominates: {:.2} vs {:.2}",
                    totals.long, totals.short
                ),
            )
        } else if totals.net < 0.0 {
            (
                Direction::Short,
                (totals.short / (totals.long + RATIO_EPSILON)).min(1.0),
                format!(
                    "Short exposure dominates: {:.2} vs {:.2}",
                    totals.short, totals.long
                ),
            )
        } else {
            return None;
        };

        if confidence <= self.config.exposure_min_confidence {
            return None;
        }

        let stop = self.config.exposure_stop;
        Some(TradeSignal::directional(
            direction,
            confidence,
            price,
            stop,
            stop * self.config.risk_reward_ratio,
            SignalSource::Exposure,
            rationale,
        ))
    }

    fn pattern_signals(&self, price: f64, patterns: &[Pattern]) -> Vec<TradeSignal> {
        let mut ranked: Vec<&Pattern> = patterns.iter().collect();
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let stop = self.config.pattern_stop;
        ranked
            .into_iter()
            .take(self.config.pattern_top_n)
            .filter(|p| p.confidence > self.config.pattern_min_confidence)
            .filter_map(|p| {
                let direction = match p.kind {
                    PatternKind::Bullish => Direction::Long,
                    PatternKind::Bearish => Direction::Short,
                    PatternKind::Neutral | PatternKind::Divergence => return None,
                };
                Some(TradeSignal::directional(
                    direction,
                    p.confidence,
                    price,
                    stop,
                    stop * self.config.risk_reward_ratio,
                    SignalSource::Pattern,
                    format!("Pattern: {}", p.description),
                ))
            })
            .collect()
    }

    fn regime_signal(&self, price: f64, regimes: &[RegimeSegment]) -> Option<TradeSignal> {
        let last = regimes.last()?;
        if last.confidence <= self.config.regime_min_confidence {
            return None;
        }

        let direction = match last.kind {
            RegimeKind::Bull => Direction::Long,
            RegimeKind::Bear => Direction::Short,
            RegimeKind::Ranging | RegimeKind::Transition => return None,
        };

        Some(TradeSignal::directional(
            direction,
            last.confidence * self.config.regime_confidence_scale,
            price,
            self.config.regime_stop,
            self.config.regime_target,
            SignalSource::Regime,
            format!(
                "{} regime since bar {} (avg return {:.4})",
                last.kind.label(),
                last.start_idx,
                last.characteristics.avg_return
            ),
        ))
    }

    /// Score each directional signal by the move from entry to its own target
    ///
    /// This checks that signals are built consistently (targets on the
    /// profitable side of entry); it does not replay the bars. Neutral
    /// signals and signals without entry or target are not counted.
    pub fn backtest(&self, bars: &[OhlcBar], signals: &[TradeSignal]) -> GexResult<BacktestReport> {
        if bars.is_empty() {
            return Err(GexError::invalid_input("backtest requires price data"));
        }
        if signals.is_empty() {
            return Err(GexError::invalid_input("backtest requires at least one signal"));
        }

        let returns: Vec<f64> = signals
            .iter()
            .filter(|s| s.direction != Direction::Neutral)
            .filter_map(TradeSignal::expected_return)
            .collect();

        let total_trades = returns.len();
        let wins = returns.iter().filter(|r| **r > 0.0).count();
        let total_return: f64 = returns.iter().sum();
        let (win_rate, avg_return) = if total_trades > 0 {
            (
                wins as f64 / total_trades as f64,
                total_return / total_trades as f64,
            )
        } else {
            (0.0, 0.0)
        };

        tracing::info!(total_trades, wins, win_rate, "signal backtest complete");

        Ok(BacktestReport {
            total_trades,
            wins,
            losses: total_trades - wins,
            win_rate,
            avg_return,
            total_return,
        })
    }
}

/// Convenience function with default configuration
pub fn generate_signals(
    price: f64,
    totals: &ExposureTotals,
    patterns: Option<&[Pattern]>,
    regimes: Option<&[RegimeSegment]>,
) -> GexResult<Vec<TradeSignal>> {
    SignalEngine::new().generate_signals(price, totals, patterns, regimes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regime::RegimeCharacteristics;

    fn totals(long: f64, short: f64) -> ExposureTotals {
        ExposureTotals {
            long,
            short,
            net: long - short,
        }
    }

    fn segment(kind: RegimeKind, confidence: f64) -> RegimeSegment {
        RegimeSegment {
            kind,
            start_idx: 20,
            end_idx: 59,
            characteristics: RegimeCharacteristics::default(),
            confidence,
        }
    }

    #[test]
    fn test_exposure_long_signal() {
        let signals = generate_signals(100.0, &totals(500.0, 0.0), None, None).unwrap();
        assert_eq!(signals.len(), 1);

        let s = &signals[0];
        assert_eq!(s.direction, Direction::Long);
        assert_eq!(s.source, SignalSource::Exposure);
        assert!((s.confidence - 1.0).abs() < 1e-12);
        assert!((s.stop.unwrap() - 98.0).abs() < 1e-9);
        assert!((s.target.unwrap() - 104.0).abs() < 1e-9);
    }

    #[test]
    fn test_exposure_short_signal() {
        let signals = generate_signals(200.0, &totals(10.0, 300.0), None, None).unwrap();
        assert_eq!(signals.len(), 1);

        let s = &signals[0];
        assert_eq!(s.direction, Direction::Short);
        assert!((s.stop.unwrap() - 204.0).abs() < 1e-9);
        assert!((s.target.unwrap() - 192.0).abs() < 1e-9);
    }

    #[test]
    fn test_exposure_balanced_is_silent() {
        // net = 0 and a weak 0.5 dominance ratio both emit nothing
        assert!(generate_signals(100.0, &totals(50.0, 50.0), None, None)
            .unwrap()
            .is_empty());
        assert!(generate_signals(100.0, &totals(50.0, 100.0), None, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_pattern_top_three_only() {
        let patterns = vec![
            Pattern::new(PatternKind::Bullish, 90.0, 0.65, 0, 5, "a"),
            Pattern::new(PatternKind::Bearish, 90.0, 0.95, 0, 5, "b"),
            Pattern::new(PatternKind::Neutral, 90.0, 0.9, 0, 5, "c"),
            Pattern::new(PatternKind::Bullish, 90.0, 0.85, 0, 5, "d"),
        ];
        let signals = generate_signals(100.0, &totals(0.0, 0.0), Some(&patterns[..]), None)
            .unwrap();

        // "a" is fourth by confidence and "c" is neutral
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].direction, Direction::Short);
        assert_eq!(signals[0].rationale, "Pattern: b");
        assert_eq!(signals[1].direction, Direction::Long);
        assert!((signals[1].stop.unwrap() - 97.0).abs() < 1e-9);
        assert!((signals[1].target.unwrap() - 106.0).abs() < 1e-9);
    }

    #[test]
    fn test_regime_signal_damped() {
        let regimes = [segment(RegimeKind::Bear, 0.3), segment(RegimeKind::Bull, 0.9)];
        let signals =
            generate_signals(100.0, &totals(0.0, 0.0), None, Some(&regimes[..])).unwrap();

        assert_eq!(signals.len(), 1);
        let s = &signals[0];
        assert_eq!(s.direction, Direction::Long);
        assert_eq!(s.source, SignalSource::Regime);
        assert!((s.confidence - 0.72).abs() < 1e-12);
        assert!((s.stop.unwrap() - 96.0).abs() < 1e-9);
        assert!((s.target.unwrap() - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_regime_below_min_confidence_after_damping() {
        // 0.7 * 0.8 = 0.56 survives the regime gate but not min_confidence
        let regimes = [segment(RegimeKind::Bear, 0.7)];
        let signals =
            generate_signals(100.0, &totals(0.0, 0.0), None, Some(&regimes[..])).unwrap();
        assert!(signals.is_empty());

        let ranging = [segment(RegimeKind::Ranging, 0.99)];
        assert!(generate_signals(100.0, &totals(0.0, 0.0), None, Some(&ranging[..]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_signals_ranked() {
        let patterns = vec![Pattern::new(PatternKind::Bullish, 50.0, 0.7, 0, 5, "p")];
        let regimes = [segment(RegimeKind::Bull, 1.0)];
        let signals = generate_signals(
            100.0,
            &totals(900.0, 1000.0),
            Some(&patterns[..]),
            Some(&regimes[..]),
        )
        .unwrap();

        assert_eq!(signals.len(), 3);
        for pair in signals.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert_eq!(signals[0].source, SignalSource::Exposure);
        assert!(signals.iter().all(|s| s.confidence >= 0.6 && s.confidence <= 1.0));
    }

    #[test]
    fn test_ties_keep_evaluator_order() {
        let engine = SignalEngine::with_config(StrategyConfig {
            regime_confidence_scale: 1.0,
            ..StrategyConfig::default()
        });
        let patterns = vec![Pattern::new(PatternKind::Bearish, 40.0, 1.0, 0, 5, "p")];
        let regimes = [segment(RegimeKind::Bull, 1.0)];

        let signals = engine
            .generate_signals(
                100.0,
                &totals(500.0, 0.0),
                Some(&patterns[..]),
                Some(&regimes[..]),
            )
            .unwrap();

        let sources: Vec<SignalSource> = signals.iter().map(|s| s.source).collect();
        assert_eq!(
            sources,
            vec![SignalSource::Exposure, SignalSource::Pattern, SignalSource::Regime]
        );
        assert!(signals.iter().all(|s| s.confidence == 1.0));
    }

    #[test]
    fn test_invalid_price() {
        let err = generate_signals(f64::NAN, &totals(1.0, 0.0), None, None).unwrap_err();
        assert!(matches!(err, GexError::InvalidInput(_)));
        assert!(generate_signals(0.0, &totals(1.0, 0.0), None, None).is_err());
    }

    #[test]
    fn test_backtest() {
        let engine = SignalEngine::new();
        let bars = vec![OhlcBar::flat(100.0, 1.0)];
        let mut signals = generate_signals(100.0, &totals(500.0, 0.0), None, None).unwrap();
        signals.push(TradeSignal::directional(
            Direction::Neutral,
            0.9,
            100.0,
            0.0,
            0.0,
            SignalSource::Regime,
            "skip",
        ));

        let report = engine.backtest(&bars, &signals).unwrap();
        assert_eq!(report.total_trades, 1);
        assert_eq!(report.wins, 1);
        assert_eq!(report.losses, 0);
        assert!((report.win_rate - 1.0).abs() < 1e-12);
        assert!((report.avg_return - 0.04).abs() < 1e-9);
        assert!((report.total_return - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_backtest_rejects_empty() {
        let engine = SignalEngine::new();
        let signals = generate_signals(100.0, &totals(500.0, 0.0), None, None).unwrap();

        assert!(engine.backtest(&[], &signals).is_err());
        assert!(engine
            .backtest(&[OhlcBar::flat(100.0, 1.0)], &[])
            .is_err());
    }
}
