//! SnapshotScanner - facade over detection and suggestion rules

use crate::exposure::StrikeExposure;

use super::{
    detect_flip, detect_pin, detect_walls, suggest_strategies, ScannerConfig, SnapshotPatterns,
    StrategySuggestion,
};

/// Scans one snapshot for walls, flips and pins
#[derive(Debug, Clone, Default)]
pub struct SnapshotScanner {
    config: ScannerConfig,
}

impl SnapshotScanner {
    /// Create a new scanner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Run wall, flip and pin detection
    pub fn scan(&self, exposures: &[StrikeExposure]) -> SnapshotPatterns {
        let patterns = SnapshotPatterns {
            walls: detect_walls(exposures, self.config.wall_threshold),
            flips: detect_flip(exposures).into_iter().collect(),
            pins: detect_pin(exposures, self.config.pin_oi_ratio)
                .into_iter()
                .collect(),
        };

        tracing::debug!(
            rows = exposures.len(),
            walls = patterns.walls.len(),
            flips = patterns.flips.len(),
            pins = patterns.pins.len(),
            "snapshot scanned"
        );

        patterns
    }

    /// Map findings to strategy suggestions
    pub fn suggest(
        &self,
        price: f64,
        total_gex: f64,
        patterns: &SnapshotPatterns,
    ) -> Vec<StrategySuggestion> {
        suggest_strategies(price, total_gex, patterns, &self.config)
    }
}

/// Convenience function with default configuration
pub fn scan_snapshot(exposures: &[StrikeExposure]) -> SnapshotPatterns {
    SnapshotScanner::new().scan(exposures)
}
