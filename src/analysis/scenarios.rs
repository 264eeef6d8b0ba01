//! Canned option-chain scenarios for client testing and demos

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{GexResult, OptionType};

/// One option row in request format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub ticker: String,
    #[serde(rename = "tipo")]
    pub option_type: OptionType,
    pub strike: f64,
    pub gamma: f64,
    pub oi: f64,
}

/// A named option-chain snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleScenario {
    pub scenario: String,
    pub current_price: f64,
    pub expiration_date: String,
    pub description: String,
    pub options: Vec<ScenarioOption>,
}

impl ExampleScenario {
    /// The scenario as an analyze request
    pub fn to_request(&self) -> GexResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn scenario(
    name: &str,
    description: &str,
    calls: [(f64, f64, f64); 4],
    puts: [(f64, f64, f64); 4],
) -> ExampleScenario {
    let row = |option_type, (strike, gamma, oi): (f64, f64, f64)| ScenarioOption {
        ticker: "SPY".to_string(),
        option_type,
        strike,
        gamma,
        oi,
    };

    ExampleScenario {
        scenario: name.to_string(),
        current_price: 100.0,
        expiration_date: "2024-02-16".to_string(),
        description: description.to_string(),
        options: calls
            .into_iter()
            .map(|c| row(OptionType::Call, c))
            .chain(puts.into_iter().map(|p| row(OptionType::Put, p)))
            .collect(),
    }
}

/// Positive gamma, negative gamma, wall and pin scenarios
pub fn example_scenarios() -> Vec<ExampleScenario> {
    vec![
        scenario(
            "Positive Gamma (Support)",
            "Strong call gamma at support level",
            [
                (98.0, 0.15, 5000.0),
                (99.0, 0.25, 8000.0),
                (100.0, 0.28, 12000.0),
                (101.0, 0.18, 6000.0),
            ],
            [
                (98.0, 0.08, 2000.0),
                (99.0, 0.12, 3500.0),
                (100.0, 0.15, 4000.0),
                (101.0, 0.08, 2000.0),
            ],
        ),
        scenario(
            "Negative Gamma (Breakdown)",
            "Strong put gamma at resistance level",
            [
                (98.0, 0.08, 2000.0),
                (99.0, 0.12, 3500.0),
                (100.0, 0.15, 4000.0),
                (101.0, 0.08, 2000.0),
            ],
            [
                (98.0, 0.15, 5000.0),
                (99.0, 0.25, 8000.0),
                (100.0, 0.28, 12000.0),
                (101.0, 0.18, 6000.0),
            ],
        ),
        scenario(
            "Gamma Wall",
            "Concentrated gamma at single strike",
            [
                (98.0, 0.05, 1000.0),
                (99.0, 0.10, 2500.0),
                (100.0, 0.45, 25000.0),
                (101.0, 0.10, 2500.0),
            ],
            [
                (98.0, 0.05, 1000.0),
                (99.0, 0.10, 2500.0),
                (100.0, 0.45, 25000.0),
                (101.0, 0.10, 2500.0),
            ],
        ),
        scenario(
            "Pin Risk",
            "Extreme OI concentration at ATM",
            [
                (98.0, 0.05, 500.0),
                (99.0, 0.08, 1000.0),
                (100.0, 0.12, 50000.0),
                (101.0, 0.08, 1000.0),
            ],
            [
                (98.0, 0.05, 500.0),
                (99.0, 0.08, 1000.0),
                (100.0, 0.12, 50000.0),
                (101.0, 0.08, 1000.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::exposure::GammaRegime;

    #[test]
    fn test_scenarios_shape() {
        let scenarios = example_scenarios();
        assert_eq!(scenarios.len(), 4);
        for s in &scenarios {
            assert_eq!(s.options.len(), 8);
            assert_eq!(s.current_price, 100.0);
        }
    }

    #[test]
    fn test_scenarios_analyze() {
        let scenarios = example_scenarios();
        let reports: Vec<_> = scenarios
            .iter()
            .map(|s| analyze(&s.to_request().unwrap()).unwrap())
            .collect();

        assert_eq!(reports[0].regime, GammaRegime::Positive);
        assert_eq!(reports[1].regime, GammaRegime::Negative);

        let pin = &reports[3].patterns.pins;
        assert_eq!(pin.len(), 1);
        assert_eq!(pin[0].strike, 100.0);
        assert!(pin[0].oi_ratio > 0.2);
    }

    #[test]
    fn test_request_uses_tipo() {
        let request = example_scenarios()[0].to_request().unwrap();
        assert_eq!(request["options"][0]["tipo"], "CALL");
        assert_eq!(request["expiration_date"], "2024-02-16");
    }
}
