//! Notional gamma exposure: gamma * OI * strike, negative for puts

use serde::{Deserialize, Serialize};

use crate::core::{OptionRecord, OptionType};

/// Gamma regime implied by the sign of total notional exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GammaRegime {
    #[serde(rename = "Positive Gamma")]
    Positive,
    #[serde(rename = "Negative Gamma")]
    Negative,
    #[serde(rename = "Neutral")]
    Neutral,
}

impl GammaRegime {
    pub fn from_total(total: f64) -> Self {
        if total > 0.0 {
            GammaRegime::Positive
        } else if total < 0.0 {
            GammaRegime::Negative
        } else {
            GammaRegime::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GammaRegime::Positive => "Positive Gamma",
            GammaRegime::Negative => "Negative Gamma",
            GammaRegime::Neutral => "Neutral",
        }
    }
}

/// Per-row notional exposure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeExposure {
    pub ticker: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike: f64,
    pub gamma: f64,
    pub oi: f64,
    /// Signed notional exposure
    pub gex: f64,
}

impl From<&OptionRecord> for StrikeExposure {
    fn from(record: &OptionRecord) -> Self {
        Self {
            ticker: record.ticker.clone(),
            option_type: record.option_type,
            strike: record.strike,
            gamma: record.gamma,
            oi: record.open_interest,
            gex: record.notional_exposure(),
        }
    }
}

/// Aggregates of a notional exposure list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NotionalSummary {
    pub total_options: usize,
    pub calls: usize,
    pub puts: usize,
    pub call_gex: f64,
    pub put_gex: f64,
    pub total_gex: f64,
}

impl NotionalSummary {
    pub fn from_exposures(exposures: &[StrikeExposure]) -> Self {
        let mut summary = Self {
            total_options: exposures.len(),
            ..Self::default()
        };

        for e in exposures {
            match e.option_type {
                OptionType::Call => {
                    summary.calls += 1;
                    summary.call_gex += e.gex;
                }
                OptionType::Put => {
                    summary.puts += 1;
                    summary.put_gex += e.gex;
                }
            }
            summary.total_gex += e.gex;
        }

        summary
    }

    pub fn regime(&self) -> GammaRegime {
        GammaRegime::from_total(self.total_gex)
    }
}

/// Notional exposure for each record, in input order
pub fn notional_exposures(records: &[OptionRecord]) -> Vec<StrikeExposure> {
    records.iter().map(StrikeExposure::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(option_type: OptionType, strike: f64, gamma: f64, oi: f64) -> OptionRecord {
        OptionRecord::new("SPY", option_type, strike, gamma, oi).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let records = vec![
            record(OptionType::Call, 100.0, 0.28, 12000.0),
            record(OptionType::Put, 100.0, 0.15, 4000.0),
        ];
        let exposures = notional_exposures(&records);
        let summary = NotionalSummary::from_exposures(&exposures);

        assert!((exposures[0].gex - 336_000.0).abs() < 1e-6);
        assert!((exposures[1].gex + 60_000.0).abs() < 1e-6);
        assert!((summary.total_gex - 276_000.0).abs() < 1e-6);
        assert_eq!(summary.regime(), GammaRegime::Positive);
        assert_eq!(summary.regime().label(), "Positive Gamma");
        assert_eq!(summary.calls, 1);
        assert_eq!(summary.puts, 1);
    }

    #[test]
    fn test_additivity() {
        let records = vec![
            record(OptionType::Call, 95.0, 0.05, 1000.0),
            record(OptionType::Put, 97.5, 0.11, 3000.0),
            record(OptionType::Call, 102.0, 0.07, 2500.0),
            record(OptionType::Put, 90.0, 0.02, 800.0),
        ];
        let exposures = notional_exposures(&records);
        let summary = NotionalSummary::from_exposures(&exposures);

        let sum: f64 = exposures.iter().map(|e| e.gex).sum();
        assert!((summary.total_gex - sum).abs() < 1e-6);
        assert!((summary.call_gex + summary.put_gex - summary.total_gex).abs() < 1e-6);
        assert!(summary.put_gex < 0.0);
    }

    #[test]
    fn test_regime_from_total() {
        assert_eq!(GammaRegime::from_total(-1.0), GammaRegime::Negative);
        assert_eq!(GammaRegime::from_total(0.0), GammaRegime::Neutral);
        assert_eq!(
            serde_json::to_string(&GammaRegime::Negative).unwrap(),
            "\"Negative Gamma\""
        );
    }
}
