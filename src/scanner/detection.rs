//! Wall, flip and pin detection over notional exposures

use crate::core::{stats, OptionType};
use crate::exposure::StrikeExposure;

use super::{FlipKind, GammaFlip, GammaWall, PinRisk};

/// Detect gamma walls
///
/// # Arguments
/// * `exposures` - Notional exposures of one snapshot, any order
/// * `threshold` - Minimum `|gex| / (mean + std)` for a wall
///
/// # Returns
/// Walls sorted by strike ascending
pub fn detect_walls(exposures: &[StrikeExposure], threshold: f64) -> Vec<GammaWall> {
    let gex: Vec<f64> = exposures.iter().map(|e| e.gex).collect();
    let scale = match (stats::mean(&gex), stats::std_dev(&gex)) {
        (Some(mean), Some(std)) => mean + std,
        _ => return Vec::new(),
    };

    let mut sorted: Vec<&StrikeExposure> = exposures.iter().collect();
    sorted.sort_by(|a, b| {
        a.strike
            .partial_cmp(&b.strike)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    sorted
        .into_iter()
        .filter_map(|e| {
            let strength = if scale != 0.0 { e.gex.abs() / scale } else { 0.0 };
            (strength > threshold).then(|| GammaWall {
                strike: e.strike,
                option_type: e.option_type,
                strength,
                gex: e.gex,
            })
        })
        .collect()
}

/// Detect a call/put sign inversion
///
/// At most one flip per snapshot.
pub fn detect_flip(exposures: &[StrikeExposure]) -> Option<GammaFlip> {
    let (call_gex, put_gex) =
        exposures
            .iter()
            .fold((0.0, 0.0), |(calls, puts), e| match e.option_type {
                OptionType::Call => (calls + e.gex, puts),
                OptionType::Put => (calls, puts + e.gex),
            });

    let kind = if call_gex > 0.0 && put_gex < 0.0 {
        FlipKind::Bearish
    } else if call_gex < 0.0 && put_gex > 0.0 {
        FlipKind::Bullish
    } else {
        return None;
    };

    // Zero or overflowing totals give a NaN ratio
    let ratio = (call_gex + put_gex).abs() / (call_gex.abs() + put_gex.abs());
    let strength = if ratio.is_finite() { ratio.min(1.0) } else { 0.0 };

    Some(GammaFlip {
        kind,
        strength,
        call_gex,
        put_gex,
    })
}

/// Detect open-interest pinning at the largest-OI strike
///
/// Ties go to the first row in input order.
pub fn detect_pin(exposures: &[StrikeExposure], min_oi_ratio: f64) -> Option<PinRisk> {
    let top = exposures.iter().fold(None::<&StrikeExposure>, |best, e| match best {
        Some(b) if b.oi >= e.oi => Some(b),
        _ => Some(e),
    })?;

    let total_oi: f64 = exposures.iter().map(|e| e.oi).sum();
    let oi_ratio = if total_oi > 0.0 { top.oi / total_oi } else { 0.0 };

    (oi_ratio > min_oi_ratio).then(|| PinRisk {
        strike: top.strike,
        oi: top.oi,
        oi_ratio,
        strength: oi_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(option_type: OptionType, strike: f64, gamma: f64, oi: f64) -> StrikeExposure {
        let sign = match option_type {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        };
        StrikeExposure {
            ticker: "SPY".to_string(),
            option_type,
            strike,
            gamma,
            oi,
            gex: sign * gamma * oi * strike,
        }
    }

    #[test]
    fn test_wall_detected() {
        let mut rows: Vec<StrikeExposure> = (0..11)
            .map(|i| row(OptionType::Call, 90.0 + i as f64, 0.01, 100.0))
            .collect();
        rows.push(row(OptionType::Call, 100.5, 0.5, 20_000.0));

        let walls = detect_walls(&rows, 2.5);
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].strike, 100.5);
        assert!((walls[0].gex - 0.5 * 20_000.0 * 100.5).abs() < 1e-6);
        assert!(walls[0].strength > 2.5);
    }

    #[test]
    fn test_wall_zero_scale() {
        // Single row: mean = gex, std = 0, strength = 1
        let rows = vec![row(OptionType::Call, 100.0, 0.1, 10.0)];
        assert!(detect_walls(&rows, 2.5).is_empty());
        assert!(detect_walls(&[], 2.5).is_empty());

        let zero = vec![row(OptionType::Call, 100.0, 0.0, 10.0); 3];
        assert!(detect_walls(&zero, 0.0).is_empty());
    }

    #[test]
    fn test_flip_bearish() {
        let rows = vec![
            row(OptionType::Call, 100.0, 0.28, 12_000.0),
            row(OptionType::Put, 100.0, 0.15, 4_000.0),
        ];
        let flip = detect_flip(&rows).unwrap();

        assert_eq!(flip.kind, FlipKind::Bearish);
        assert!((flip.call_gex - 336_000.0).abs() < 1e-6);
        assert!((flip.put_gex + 60_000.0).abs() < 1e-6);
        assert!((flip.strength - 276_000.0 / 396_000.0).abs() < 1e-12);
    }

    #[test]
    fn test_flip_requires_both_sides() {
        let rows = vec![row(OptionType::Call, 100.0, 0.28, 12_000.0)];
        assert!(detect_flip(&rows).is_none());
    }

    #[test]
    fn test_flip_strength_finite_on_overflow() {
        let rows = vec![
            row(OptionType::Call, 1e300, 1e10, 1.0),
            row(OptionType::Put, 1e300, 1e10, 1.0),
        ];
        let flip = detect_flip(&rows).unwrap();

        assert_eq!(flip.kind, FlipKind::Bearish);
        assert_eq!(flip.strength, 0.0);
        assert!(detect_walls(&rows, 2.5).iter().all(|w| w.strength.is_finite()));
    }

    #[test]
    fn test_pin() {
        let rows = vec![
            row(OptionType::Call, 99.0, 0.08, 1_000.0),
            row(OptionType::Call, 100.0, 0.12, 50_000.0),
            row(OptionType::Put, 100.0, 0.12, 50_000.0),
            row(OptionType::Put, 101.0, 0.08, 1_000.0),
        ];
        let pin = detect_pin(&rows, 0.2).unwrap();

        assert_eq!(pin.strike, 100.0);
        assert_eq!(pin.oi, 50_000.0);
        assert!((pin.oi_ratio - 50_000.0 / 102_000.0).abs() < 1e-12);
        assert_eq!(pin.strength, pin.oi_ratio);
    }

    #[test]
    fn test_no_pin_when_spread() {
        let rows: Vec<StrikeExposure> = (0..10)
            .map(|i| row(OptionType::Call, 95.0 + i as f64, 0.1, 1_000.0))
            .collect();
        assert!(detect_pin(&rows, 0.2).is_none());
        assert!(detect_pin(&[], 0.2).is_none());
    }
}
