//! OHLC price bars
//!
//! Historical price/volume series fed to the pattern detector and the regime
//! segmenter. Bars are ordered by their position in the series; the index of a
//! bar is its time index.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{GexError, GexResult};

/// Lowest close accepted by [`BarSeries::new`]
pub const MIN_PRICE: f64 = 0.0001;
/// Highest close accepted by [`BarSeries::new`]
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Highest volume accepted by [`BarSeries::new`]
pub const MAX_VOLUME: f64 = 1e15;

/// Single OHLC bar with volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Flat bar (open = high = low = close)
    pub fn flat(price: f64, volume: f64) -> Self {
        Self::new(price, price, price, price, volume)
    }

    /// Check the bar invariants: finite fields, low <= open/close <= high,
    /// close and volume in range
    pub fn validate(&self) -> GexResult<()> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(GexError::data("non-finite OHLC value"));
        }
        if self.high < self.low {
            return Err(GexError::data(format!(
                "high {} below low {}",
                self.high, self.low
            )));
        }
        if self.open > self.high || self.open < self.low {
            return Err(GexError::data(format!(
                "open {} outside [{}, {}]",
                self.open, self.low, self.high
            )));
        }
        if self.close > self.high || self.close < self.low {
            return Err(GexError::data(format!(
                "close {} outside [{}, {}]",
                self.close, self.low, self.high
            )));
        }
        if self.close < MIN_PRICE || self.close > MAX_PRICE {
            return Err(GexError::data(format!(
                "close {} outside [{}, {}]",
                self.close, MIN_PRICE, MAX_PRICE
            )));
        }
        if self.volume < 0.0 || self.volume > MAX_VOLUME {
            return Err(GexError::data(format!("volume {} out of range", self.volume)));
        }
        Ok(())
    }

    /// Exact bit pattern of every field, for duplicate detection
    fn bit_key(&self) -> [u64; 5] {
        [
            self.open.to_bits(),
            self.high.to_bits(),
            self.low.to_bits(),
            self.close.to_bits(),
            self.volume.to_bits(),
        ]
    }
}

/// Validated, length-capped bar sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarSeries {
    bars: Vec<OhlcBar>,
}

impl BarSeries {
    /// Validate every bar and the length cap
    pub fn new(bars: Vec<OhlcBar>, max_len: usize) -> GexResult<Self> {
        if bars.len() > max_len {
            return Err(GexError::validation(format!(
                "bar series too long: {} > {}",
                bars.len(),
                max_len
            )));
        }

        for (i, bar) in bars.iter().enumerate() {
            bar.validate()
                .map_err(|e| GexError::validation(format!("bar {}: {}", i, e)))?;
        }

        Ok(Self { bars })
    }

    /// Drop bars with a non-finite close and exact duplicates of an earlier bar
    ///
    /// Order of the surviving bars is preserved.
    pub fn clean(bars: Vec<OhlcBar>) -> Vec<OhlcBar> {
        let mut seen = HashSet::with_capacity(bars.len());
        bars.into_iter()
            .filter(|bar| bar.close.is_finite() && seen.insert(bar.bit_key()))
            .collect()
    }

    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close of the last bar
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}

/// Extract closes from a bar slice
pub fn closes(bars: &[OhlcBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract volumes from a bar slice
pub fn volumes(bars: &[OhlcBar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_validation() {
        assert!(OhlcBar::new(100.0, 102.0, 99.0, 101.0, 1000.0).validate().is_ok());
        // high below low
        assert!(OhlcBar::new(100.0, 98.0, 99.0, 98.5, 1000.0).validate().is_err());
        // close above high
        assert!(OhlcBar::new(100.0, 102.0, 99.0, 103.0, 1000.0).validate().is_err());
        // open below low
        assert!(OhlcBar::new(98.0, 102.0, 99.0, 101.0, 1000.0).validate().is_err());
        // negative volume
        assert!(OhlcBar::new(100.0, 102.0, 99.0, 101.0, -1.0).validate().is_err());
        // NaN
        assert!(OhlcBar::new(100.0, f64::NAN, 99.0, 101.0, 1.0).validate().is_err());
    }

    #[test]
    fn test_series_length_cap() {
        let bars = vec![OhlcBar::flat(100.0, 10.0); 11];
        let err = BarSeries::new(bars.clone(), 10).unwrap_err();
        assert!(err.is_validation());

        let series = BarSeries::new(bars, 11).unwrap();
        assert_eq!(series.len(), 11);
        assert_eq!(series.last_close(), Some(100.0));
    }

    #[test]
    fn test_clean_removes_duplicates_and_nan() {
        let a = OhlcBar::new(100.0, 102.0, 99.0, 101.0, 1000.0);
        let b = OhlcBar::new(101.0, 103.0, 100.0, 102.0, 1100.0);
        let bad = OhlcBar::new(101.0, 103.0, 100.0, f64::NAN, 1100.0);

        let cleaned = BarSeries::clean(vec![a, b, a, bad, b]);
        assert_eq!(cleaned, vec![a, b]);
    }

    #[test]
    fn test_close_and_volume_columns() {
        let bars = [OhlcBar::flat(100.0, 5.0), OhlcBar::flat(101.5, 7.0)];
        assert_eq!(closes(&bars), vec![100.0, 101.5]);
        assert_eq!(volumes(&bars), vec![5.0, 7.0]);
        assert!(closes(&[]).is_empty());
    }
}
