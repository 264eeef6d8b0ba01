//! RegimeSegmenter - single forward pass over trailing-window statistics

use crate::core::stats::{self, clamp_or_zero};
use crate::core::{bar, GexError, GexResult, OhlcBar};

use super::{RegimeCharacteristics, RegimeConfig, RegimeKind, RegimeSegment};

#[derive(Debug, Clone, Default)]
pub struct RegimeSegmenter {
    config: RegimeConfig,
}

/// Per-bar trailing statistics
struct RollingStats {
    returns: Vec<f64>,
    volatility: Vec<f64>,
    volume_ma: Vec<f64>,
}

impl RegimeSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    /// Segment a bar series
    ///
    /// Segments cover `[window, n - 1]` contiguously. Fewer than `window`
    /// bars give an empty list; so does unusable data, which is logged.
    pub fn segment(&self, bars: &[OhlcBar]) -> Vec<RegimeSegment> {
        match self.try_segment(bars) {
            Ok(segments) => {
                tracing::debug!(bars = bars.len(), segments = segments.len(), "regimes segmented");
                segments
            }
            Err(e) => {
                tracing::warn!(error = %e, "regime segmentation failed, returning no regimes");
                Vec::new()
            }
        }
    }

    fn try_segment(&self, bars: &[OhlcBar]) -> GexResult<Vec<RegimeSegment>> {
        let window = self.config.window;
        if window == 0 {
            return Err(GexError::invalid_input("regime window must be positive"));
        }
        if bars.len() < window {
            return Ok(Vec::new());
        }

        let rolling = self.rolling_stats(bars)?;
        let n = bars.len();

        let mut segments = Vec::new();
        let mut current: Option<RegimeKind> = None;
        let mut start = window;

        for i in window..n {
            let recent_return = stats::mean_or_zero(&rolling.returns[i - window..i]);
            let kind = self.classify(recent_return);

            match current {
                Some(prev) if prev == kind => {}
                Some(prev) => {
                    segments.push(self.close_segment(prev, start, i - 1, &rolling));
                    current = Some(kind);
                    start = i;
                }
                None => {
                    current = Some(kind);
                    start = i;
                }
            }
        }

        if let Some(kind) = current {
            segments.push(self.close_segment(kind, start, n - 1, &rolling));
        }

        Ok(segments)
    }

    fn classify(&self, mean_return: f64) -> RegimeKind {
        if mean_return > self.config.return_threshold {
            RegimeKind::Bull
        } else if mean_return < -self.config.return_threshold {
            RegimeKind::Bear
        } else {
            RegimeKind::Ranging
        }
    }

    fn rolling_stats(&self, bars: &[OhlcBar]) -> GexResult<RollingStats> {
        let window = self.config.window;
        let n = bars.len();

        let closes = bar::closes(bars);
        let volumes = bar::volumes(bars);

        let returns = stats::simple_returns(&closes)
            .ok_or_else(|| GexError::data("non-positive or non-finite close in series"))?;
        if volumes.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(GexError::data("negative or non-finite volume in series"));
        }

        let mut volatility = vec![0.0; n];
        let mut volume_ma = vec![0.0; n];
        for i in window..n {
            volatility[i] = stats::std_or_zero(&returns[i - window..i]);
            volume_ma[i] = stats::mean_or_zero(&volumes[i - window..i]);
        }

        Ok(RollingStats {
            returns,
            volatility,
            volume_ma,
        })
    }

    /// Build the segment `[start, end]` with its aggregates
    fn close_segment(
        &self,
        kind: RegimeKind,
        start: usize,
        end: usize,
        rolling: &RollingStats,
    ) -> RegimeSegment {
        // returns[j] is the move from bar j to bar j + 1, so the last bar has none
        let returns_end = (end + 1).min(rolling.returns.len());
        let returns = &rolling.returns[start.min(returns_end)..returns_end];
        let volatility = &rolling.volatility[start..=end];
        let volume_ma = &rolling.volume_ma[start..=end];

        RegimeSegment {
            kind,
            start_idx: start,
            end_idx: end,
            characteristics: RegimeCharacteristics {
                avg_return: stats::mean_or_zero(returns),
                volatility: stats::mean_or_zero(volatility),
                avg_volume: stats::mean_or_zero(volume_ma),
            },
            confidence: self.confidence(returns, volatility),
        }
    }

    /// Calm and directionally consistent spans score high
    fn confidence(&self, returns: &[f64], volatility: &[f64]) -> f64 {
        if returns.is_empty() {
            return 0.0;
        }

        let volatility_score =
            1.0 - (stats::mean_or_zero(volatility) * self.config.volatility_scale).min(1.0);
        let consistency_score = stats::mean_or_zero(returns).abs()
            / (stats::std_or_zero(returns) + self.config.epsilon);

        clamp_or_zero((volatility_score + consistency_score.min(1.0)) / 2.0, 0.0, 1.0)
    }
}

/// Convenience function with default configuration
pub fn segment_regimes(bars: &[OhlcBar]) -> Vec<RegimeSegment> {
    RegimeSegmenter::new().segment(bars)
}
