//! PatternDetector - runs every scan over a bar sequence
//!
//! Scans are fault-isolated: each returns a `GexResult`, and a failing scan
//! is logged and contributes nothing while the others still run.

use crate::core::{bar, stats, GexError, GexResult, OhlcBar};

use super::{Pattern, PatternConfig, PatternKind};

type Scan = fn(&PatternDetector, &[OhlcBar]) -> GexResult<Vec<Pattern>>;

#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    config: PatternConfig,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PatternConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Run all scans and rank the results by confidence (descending, stable)
    ///
    /// Sequences shorter than `min_length` give an empty list.
    pub fn detect(&self, bars: &[OhlcBar]) -> Vec<Pattern> {
        if bars.len() < self.config.min_length.max(2) {
            return Vec::new();
        }

        let scans: [(&str, Scan); 4] = [
            ("resistance", Self::scan_resistance),
            ("support", Self::scan_support),
            ("volatility", Self::scan_volatility),
            ("trend", Self::scan_trend),
        ];

        let mut patterns = Vec::new();
        for (name, scan) in scans {
            match scan(self, bars) {
                Ok(found) => {
                    tracing::debug!(scan = name, found = found.len(), "pattern scan finished");
                    patterns.extend(found);
                }
                Err(e) => {
                    tracing::warn!(scan = name, error = %e, "pattern scan failed, skipping");
                }
            }
        }

        patterns.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        patterns
    }

    /// Close pushing into the recent high
    fn scan_resistance(&self, bars: &[OhlcBar]) -> GexResult<Vec<Pattern>> {
        let lookback = self.config.level_lookback;
        let mut patterns = Vec::new();

        for i in self.first_scan_index()..bars.len() {
            let recent_high = bars[i - lookback..i]
                .iter()
                .map(|b| b.high)
                .fold(f64::NEG_INFINITY, f64::max);
            let close = bars[i].close;

            if !recent_high.is_finite() || recent_high <= 0.0 || !close.is_finite() {
                return Err(GexError::data(format!("unusable high/close near bar {}", i)));
            }

            if close > self.config.resistance_factor * recent_high {
                let strength = (close / recent_high - 1.0) * 100.0;
                let pattern = Pattern::new(
                    PatternKind::Bearish,
                    strength,
                    strength / 100.0,
                    i - lookback,
                    i,
                    "GEX Resistance Level",
                )
                .with_signal("resistance_level", recent_high)
                .with_signal("current_price", close);
                patterns.push(pattern);
            }
        }

        Ok(patterns)
    }

    /// Close sitting on the recent low
    fn scan_support(&self, bars: &[OhlcBar]) -> GexResult<Vec<Pattern>> {
        let lookback = self.config.level_lookback;
        let mut patterns = Vec::new();

        for i in self.first_scan_index()..bars.len() {
            let recent_low = bars[i - lookback..i]
                .iter()
                .map(|b| b.low)
                .fold(f64::INFINITY, f64::min);
            let close = bars[i].close;

            if !recent_low.is_finite() || recent_low <= 0.0 || !close.is_finite() {
                return Err(GexError::data(format!("unusable low/close near bar {}", i)));
            }

            if close < self.config.support_factor * recent_low {
                let strength = (1.0 - close / recent_low) * 100.0;
                let pattern = Pattern::new(
                    PatternKind::Bullish,
                    strength,
                    strength / 100.0,
                    i - lookback,
                    i,
                    "GEX Support Level",
                )
                .with_signal("support_level", recent_low)
                .with_signal("current_price", close);
                patterns.push(pattern);
            }
        }

        Ok(patterns)
    }

    /// Recent return dispersion against the whole series
    fn scan_volatility(&self, bars: &[OhlcBar]) -> GexResult<Vec<Pattern>> {
        let window = self.config.volatility_window;
        if window == 0 || bars.len() < window {
            return Ok(Vec::new());
        }

        let closes = bar::closes(bars);
        let returns = stats::simple_returns(&closes)
            .ok_or_else(|| GexError::data("non-positive or non-finite close in series"))?;

        let recent = &returns[returns.len().saturating_sub(window)..];
        let recent_vol = stats::std_or_zero(recent);
        let baseline_vol = stats::std_or_zero(&returns);

        if recent_vol > baseline_vol * self.config.volatility_multiplier {
            let n = bars.len();
            let pattern = Pattern::new(
                PatternKind::Neutral,
                recent_vol * 100.0,
                self.config.volatility_confidence,
                n - window,
                n - 1,
                "High Volatility Period",
            )
            .with_signal("volatility", recent_vol)
            .with_signal("baseline_volatility", baseline_vol);
            return Ok(vec![pattern]);
        }

        Ok(Vec::new())
    }

    /// Last close against the close `trend_lookback - 1` bars earlier
    fn scan_trend(&self, bars: &[OhlcBar]) -> GexResult<Vec<Pattern>> {
        let lookback = self.config.trend_lookback;
        let n = bars.len();
        if lookback < 2 || n < lookback {
            return Ok(Vec::new());
        }

        let last = bars[n - 1].close;
        let earlier = bars[n - lookback].close;
        if !(last.is_finite() && earlier.is_finite()) || last <= 0.0 || earlier <= 0.0 {
            return Err(GexError::data("non-positive or non-finite close in trend window"));
        }

        let pattern = if last > earlier {
            let change = (last / earlier - 1.0) * 100.0;
            Pattern::new(
                PatternKind::Bullish,
                change,
                self.config.trend_confidence,
                n - lookback,
                n - 1,
                "Uptrend",
            )
            .with_signal("change_percent", change)
        } else if last < earlier {
            let change = (earlier / last - 1.0) * 100.0;
            Pattern::new(
                PatternKind::Bearish,
                change,
                self.config.trend_confidence,
                n - lookback,
                n - 1,
                "Downtrend",
            )
            .with_signal("change_percent", change)
        } else {
            return Ok(Vec::new());
        };

        Ok(vec![pattern])
    }

    /// First bar with a full lookback window behind it
    fn first_scan_index(&self) -> usize {
        self.config.level_lookback.max(self.config.min_length).max(1)
    }
}

/// Convenience function with default configuration
pub fn detect_patterns(bars: &[OhlcBar]) -> Vec<Pattern> {
    PatternDetector::new().detect(bars)
}
