//! Fixed-rule mapping from snapshot findings to strategy suggestions

use crate::core::stats::clamp_or_zero;
use crate::strategy::Direction;

use super::{ScannerConfig, SnapshotPatterns, StrategySuggestion};

/// Build strategy suggestions for a snapshot
///
/// # Arguments
/// * `price` - Current underlying price
/// * `total_gex` - Total notional exposure of the snapshot
/// * `patterns` - Walls, flips and pins found in the snapshot
/// * `config` - Scanner configuration
///
/// # Returns
/// The gamma trade (if total is non-zero), then one suggestion per wall,
/// per flip and per pin, in that order
pub fn suggest_strategies(
    price: f64,
    total_gex: f64,
    patterns: &SnapshotPatterns,
    config: &ScannerConfig,
) -> Vec<StrategySuggestion> {
    let mut suggestions = Vec::new();
    let step = config.trade_move;

    if total_gex != 0.0 {
        let magnitude = total_gex.abs();
        let confidence = (magnitude / (magnitude + 1.0)).min(config.max_confidence);
        let suggestion = if total_gex > 0.0 {
            StrategySuggestion {
                strategy_name: "Positive Gamma Trade".to_string(),
                direction: Direction::Long,
                description: "Dealers long gamma - moves are dampened, favourable for option sellers near the market".to_string(),
                confidence,
                entry_price: Some(price),
                target_price: price * (1.0 + step),
                stop_loss: Some(price * (1.0 - step)),
            }
        } else {
            StrategySuggestion {
                strategy_name: "Negative Gamma Trade".to_string(),
                direction: Direction::Short,
                description: "Dealers short gamma - moves are amplified, unfavourable for ATM option sellers".to_string(),
                confidence,
                entry_price: Some(price),
                target_price: price * (1.0 - step),
                stop_loss: Some(price * (1.0 + step)),
            }
        };
        suggestions.push(suggestion);
    }

    for wall in &patterns.walls {
        let direction = if wall.gex > 0.0 {
            Direction::Long
        } else {
            Direction::Short
        };
        suggestions.push(StrategySuggestion {
            strategy_name: format!("Gamma Wall at {:.2}", wall.strike),
            direction,
            description: "Strong gamma wall - expect support/resistance".to_string(),
            confidence: clamp_or_zero(wall.strength / config.wall_full_strength, 0.0, 1.0),
            entry_price: Some(price),
            target_price: wall.strike,
            stop_loss: Some(price * (1.0 - direction.sign() * config.wall_stop)),
        });
    }

    for flip in &patterns.flips {
        let direction = flip.kind.direction();
        suggestions.push(StrategySuggestion {
            strategy_name: flip.kind.label().to_string(),
            direction,
            description: format!(
                "Call and put exposure of opposite sign (calls {:.0}, puts {:.0})",
                flip.call_gex, flip.put_gex
            ),
            confidence: clamp_or_zero(flip.strength, 0.0, config.max_confidence),
            entry_price: Some(price),
            target_price: price * (1.0 + direction.sign() * step),
            stop_loss: Some(price * (1.0 - direction.sign() * step)),
        });
    }

    for pin in &patterns.pins {
        suggestions.push(StrategySuggestion {
            strategy_name: format!("Pin Risk Alert at {:.2}", pin.strike),
            direction: Direction::Neutral,
            description: "High OI concentration - pin risk detected".to_string(),
            confidence: clamp_or_zero(pin.oi_ratio, 0.0, 1.0),
            entry_price: None,
            target_price: pin.strike,
            stop_loss: None,
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;
    use crate::scanner::{FlipKind, GammaFlip, GammaWall, PinRisk};

    #[test]
    fn test_positive_gamma_trade() {
        let s = suggest_strategies(
            100.0,
            276_000.0,
            &SnapshotPatterns::default(),
            &ScannerConfig::default(),
        );
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].strategy_name, "Positive Gamma Trade");
        assert_eq!(s[0].direction, Direction::Long);
        assert!((s[0].confidence - 0.95).abs() < 1e-12);
        assert!((s[0].target_price - 102.0).abs() < 1e-9);
        assert!((s[0].stop_loss.unwrap() - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_gamma_trade() {
        let s = suggest_strategies(
            100.0,
            -1.0,
            &SnapshotPatterns::default(),
            &ScannerConfig::default(),
        );
        assert_eq!(s[0].direction, Direction::Short);
        assert!((s[0].confidence - 0.5).abs() < 1e-12);
        assert!((s[0].target_price - 98.0).abs() < 1e-9);
        assert!((s[0].stop_loss.unwrap() - 102.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_has_no_gamma_trade() {
        let s = suggest_strategies(
            100.0,
            0.0,
            &SnapshotPatterns::default(),
            &ScannerConfig::default(),
        );
        assert!(s.is_empty());
    }

    #[test]
    fn test_wall_flip_pin_suggestions() {
        let patterns = SnapshotPatterns {
            walls: vec![
                GammaWall {
                    strike: 105.0,
                    option_type: OptionType::Call,
                    strength: 3.0,
                    gex: 1_000.0,
                },
                GammaWall {
                    strike: 95.0,
                    option_type: OptionType::Put,
                    strength: 7.5,
                    gex: -1_000.0,
                },
            ],
            flips: vec![GammaFlip {
                kind: FlipKind::Bullish,
                strength: 0.4,
                call_gex: -10.0,
                put_gex: 30.0,
            }],
            pins: vec![PinRisk {
                strike: 100.0,
                oi: 50_000.0,
                oi_ratio: 0.48,
                strength: 0.48,
            }],
        };
        let s = suggest_strategies(100.0, 0.0, &patterns, &ScannerConfig::default());
        assert_eq!(s.len(), 4);

        let long_wall = &s[0];
        assert_eq!(long_wall.strategy_name, "Gamma Wall at 105.00");
        assert_eq!(long_wall.direction, Direction::Long);
        assert!((long_wall.confidence - 0.6).abs() < 1e-12);
        assert_eq!(long_wall.target_price, 105.0);
        assert!((long_wall.stop_loss.unwrap() - 97.0).abs() < 1e-9);

        let short_wall = &s[1];
        assert_eq!(short_wall.direction, Direction::Short);
        assert_eq!(short_wall.confidence, 1.0);
        assert!((short_wall.stop_loss.unwrap() - 103.0).abs() < 1e-9);

        let flip = &s[2];
        assert_eq!(flip.strategy_name, "Bullish Flip");
        assert_eq!(flip.direction, Direction::Long);
        assert!((flip.confidence - 0.4).abs() < 1e-12);
        assert!((flip.target_price - 102.0).abs() < 1e-9);

        let pin = &s[3];
        assert_eq!(pin.strategy_name, "Pin Risk Alert at 100.00");
        assert_eq!(pin.direction, Direction::Neutral);
        assert!(pin.entry_price.is_none() && pin.stop_loss.is_none());
        assert_eq!(pin.target_price, 100.0);
        assert!((pin.confidence - 0.48).abs() < 1e-12);
    }
}
