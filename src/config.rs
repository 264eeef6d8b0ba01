//! Analyzer-wide configuration
//!
//! One JSON document configures every component. Missing sections and
//! missing fields fall back to their defaults, so `{}` is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{GexError, GexResult};
use crate::exposure::ExposureConfig;
use crate::patterns::PatternConfig;
use crate::regime::RegimeConfig;
use crate::scanner::ScannerConfig;
use crate::strategy::StrategyConfig;

/// Input size caps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Most option rows accepted by one analysis
    /// Default: 100_000
    pub max_options: usize,

    /// Longest bar series accepted by one history analysis
    /// Default: 1_000_000
    pub max_bars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_options: 100_000,
            max_bars: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub exposure: ExposureConfig,
    pub patterns: PatternConfig,
    pub regime: RegimeConfig,
    pub strategy: StrategyConfig,
    pub scanner: ScannerConfig,
    pub limits: Limits,
}

impl AnalyzerConfig {
    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> GexResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> GexResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(GexError::IO)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "loaded analyzer config");
        Ok(config)
    }

    /// Reject settings no component can run with
    pub fn validate(&self) -> GexResult<()> {
        if self.regime.window == 0 {
            return Err(GexError::validation("regime.window must be positive"));
        }
        if self.patterns.min_length < 2 {
            return Err(GexError::validation("patterns.min_length must be at least 2"));
        }
        if self.strategy.risk_reward_ratio <= 0.0 {
            return Err(GexError::validation(
                "strategy.risk_reward_ratio must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.strategy.min_confidence) {
            return Err(GexError::validation(
                "strategy.min_confidence must be within [0, 1]",
            ));
        }
        if self.scanner.wall_full_strength <= 0.0 {
            return Err(GexError::validation(
                "scanner.wall_full_strength must be positive",
            ));
        }
        if self.limits.max_options == 0 || self.limits.max_bars == 0 {
            return Err(GexError::validation("limits must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = AnalyzerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AnalyzerConfig::from_json_str(
            r#"{ "scanner": { "wall_threshold": 3.0 }, "limits": { "max_bars": 500 } }"#,
        )
        .unwrap();

        assert_eq!(config.scanner.wall_threshold, 3.0);
        assert_eq!(config.scanner.pin_oi_ratio, 0.2);
        assert_eq!(config.limits.max_bars, 500);
        assert_eq!(config.limits.max_options, 100_000);
        assert_eq!(config.regime.window, 20);
    }

    #[test]
    fn test_rejects_unusable_settings() {
        let err = AnalyzerConfig::from_json_str(r#"{ "regime": { "window": 0 } }"#).unwrap_err();
        assert!(err.is_validation());

        let err = AnalyzerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GexError::Serialization(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AnalyzerConfig::load("/nonexistent/gex-config.json").unwrap_err();
        assert!(matches!(err, GexError::IO(_)));
    }
}
