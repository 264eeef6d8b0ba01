//! Descriptive statistics over a set of exposure values

use serde::{Deserialize, Serialize};

use crate::core::stats;

/// Summary of an exposure distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub max: f64,
    pub min: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    /// Count of values with |v| > threshold
    pub significant_barriers: usize,
    pub count: usize,
}

/// Mean/std/min/max/quartiles and barrier count; `None` for empty input
pub fn analyze_levels(values: &[f64], threshold: f64) -> Option<LevelStats> {
    let mean = stats::mean(values)?;
    let std = stats::std_dev(values)?;
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    Some(LevelStats {
        mean,
        std,
        max,
        min,
        percentile_25: stats::percentile(values, 25.0)?,
        percentile_75: stats::percentile(values, 75.0)?,
        significant_barriers: values.iter().filter(|v| v.abs() > threshold).count(),
        count: values.len(),
    })
}
