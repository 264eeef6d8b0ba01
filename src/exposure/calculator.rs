//! ExposureCalculator - weighted exposure aggregation and pricing helpers
//!
//! The calculator only holds configuration. Spot, volatility and time are
//! passed to every call, so one instance can serve any number of concurrent
//! requests.

use chrono::Utc;

use crate::core::{Greeks, OptionType};
use crate::models::{self, IvSolution, Valuation};

use super::{
    analyze_levels, ExposureConfig, ExposureSnapshot, ExposureStatus, ExposureTotals, LevelStats,
    WeightedStrike,
};

/// Spot-proximity weight: 1 / (1 + |strike - spot| / spot), 1.0 when spot is 0
pub fn distance_weight(strike: f64, spot: f64) -> f64 {
    if spot == 0.0 {
        return 1.0;
    }
    1.0 / (1.0 + (strike - spot).abs() / spot)
}

#[derive(Debug, Clone, Default)]
pub struct ExposureCalculator {
    config: ExposureConfig,
}

impl ExposureCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExposureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    /// Distance-weighted exposure per strike plus long/short/net totals
    ///
    /// Empty or mismatched-length inputs, and a negative or non-finite spot,
    /// give an all-zero snapshot tagged [`ExposureStatus::InvalidInput`].
    /// Strikes with non-finite values, or whose exposure overflows, are skipped.
    pub fn compute_exposure(
        &self,
        spot: f64,
        strikes: &[f64],
        gammas: &[f64],
        open_interest: &[f64],
    ) -> ExposureSnapshot {
        if strikes.is_empty()
            || strikes.len() != gammas.len()
            || strikes.len() != open_interest.len()
        {
            tracing::warn!(
                strikes = strikes.len(),
                gammas = gammas.len(),
                open_interest = open_interest.len(),
                "empty or mismatched exposure inputs"
            );
            return ExposureSnapshot::invalid(spot);
        }
        if !spot.is_finite() || spot < 0.0 {
            tracing::warn!(spot, "invalid spot for exposure calculation");
            return ExposureSnapshot::invalid(spot);
        }

        let mut per_strike: Vec<WeightedStrike> = Vec::with_capacity(strikes.len());

        for ((&strike, &gamma), &oi) in strikes.iter().zip(gammas).zip(open_interest) {
            if !(strike.is_finite() && gamma.is_finite() && oi.is_finite()) {
                tracing::warn!(strike, gamma, oi, "skipping non-finite strike row");
                continue;
            }

            let weight = distance_weight(strike, spot);
            let exposure = gamma * oi * weight;
            if !exposure.is_finite() {
                tracing::warn!(strike, gamma, oi, "skipping strike row with overflowing exposure");
                continue;
            }
            per_strike.push(WeightedStrike {
                strike,
                weight,
                exposure,
            });
        }

        let values: Vec<f64> = per_strike.iter().map(|s| s.exposure).collect();
        let totals = ExposureTotals::from_values(&values);

        tracing::debug!(
            strikes = per_strike.len(),
            net = totals.net,
            "weighted exposure computed"
        );

        ExposureSnapshot {
            spot,
            strikes: per_strike,
            totals,
            status: ExposureStatus::Computed,
            generated_at: Utc::now(),
        }
    }

    /// Black-Scholes price at the configured rate
    pub fn price(
        &self,
        spot: f64,
        strike: f64,
        vol: f64,
        time: f64,
        option_type: OptionType,
    ) -> Valuation {
        models::value(spot, strike, self.config.risk_free_rate, vol, time, option_type)
    }

    /// Delta/gamma/vega at the configured rate
    pub fn greeks(
        &self,
        spot: f64,
        strike: f64,
        vol: f64,
        time: f64,
        option_type: OptionType,
    ) -> Greeks {
        models::greeks(spot, strike, self.config.risk_free_rate, vol, time, option_type)
    }

    /// Implied volatility at the configured rate
    pub fn implied_volatility(
        &self,
        option_price: f64,
        spot: f64,
        strike: f64,
        time: f64,
        option_type: OptionType,
    ) -> IvSolution {
        models::implied_volatility(
            option_price,
            spot,
            strike,
            self.config.risk_free_rate,
            time,
            option_type,
        )
    }

    /// Descriptive statistics with the configured barrier threshold
    pub fn analyze_levels(&self, values: &[f64]) -> Option<LevelStats> {
        analyze_levels(values, self.config.level_threshold)
    }
}

/// Convenience function with default configuration
pub fn compute_exposure(
    spot: f64,
    strikes: &[f64],
    gammas: &[f64],
    open_interest: &[f64],
) -> ExposureSnapshot {
    ExposureCalculator::new().compute_exposure(spot, strikes, gammas, open_interest)
}
