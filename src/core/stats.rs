//! Descriptive statistics over plain `f64` slices
//!
//! Population moments (ddof = 0) throughout, matching the conventions the
//! detectors are calibrated against.

use ndarray::ArrayView1;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    ArrayView1::from(values).mean()
}

/// Population standard deviation, `None` for an empty slice
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(ArrayView1::from(values).std(0.0))
}

/// Mean, or 0.0 for an empty slice
pub fn mean_or_zero(values: &[f64]) -> f64 {
    mean(values).unwrap_or(0.0)
}

/// Population standard deviation, or 0.0 for an empty slice
pub fn std_or_zero(values: &[f64]) -> f64 {
    std_dev(values).unwrap_or(0.0)
}

/// Percentile with linear interpolation between closest ranks
///
/// `q` is in percent (0..=100).
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Simple returns: r_j = x[j+1] / x[j] - 1
///
/// Returns `None` if any divisor is non-positive or any value is non-finite.
pub fn simple_returns(values: &[f64]) -> Option<Vec<f64>> {
    if values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    values
        .windows(2)
        .map(|w| if w[0] > 0.0 { Some(w[1] / w[0] - 1.0) } else { None })
        .collect()
}

/// Clamp, mapping NaN to the lower bound
pub fn clamp_or_zero(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v).unwrap() - 5.0).abs() < 1e-12);
        // Population std of the classic example is exactly 2
        assert!((std_dev(&v).unwrap() - 2.0).abs() < 1e-12);

        assert!(mean(&[]).is_none());
        assert!(std_dev(&[]).is_none());
        assert_eq!(mean_or_zero(&[]), 0.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&v, 25.0).unwrap() - 1.75).abs() < 1e-12);
        assert!((percentile(&v, 75.0).unwrap() - 3.25).abs() < 1e-12);
        assert!((percentile(&v, 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((percentile(&v, 100.0).unwrap() - 4.0).abs() < 1e-12);
        assert!(percentile(&[], 50.0).is_none());
    }

    #[test]
    fn test_simple_returns() {
        let r = simple_returns(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-12);
        assert!((r[1] + 0.1).abs() < 1e-12);

        assert!(simple_returns(&[100.0, 0.0, 50.0]).is_none());
        assert!(simple_returns(&[100.0, f64::NAN]).is_none());
        assert_eq!(simple_returns(&[100.0]).unwrap().len(), 0);
    }

    #[test]
    fn test_clamp_or_zero() {
        assert_eq!(clamp_or_zero(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp_or_zero(f64::INFINITY, 0.0, 100.0), 100.0);
        assert_eq!(clamp_or_zero(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp_or_zero(0.4, 0.0, 1.0), 0.4);
    }
}
