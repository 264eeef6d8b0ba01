//! Option records
//!
//! A single row of an option-chain snapshot: the contract side, its strike,
//! the gamma quoted for it and the open interest sitting on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bar::{MAX_PRICE, MAX_VOLUME};
use super::error::{GexError, GexResult};

/// Largest accepted |gamma| per contract
pub const MAX_GAMMA: f64 = 1e6;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Sign applied to notional exposure: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "CALL",
            OptionType::Put => "PUT",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OptionType {
    type Err = GexError;

    /// Accepts `C`, `CALL`, `P`, `PUT` in any case, surrounding whitespace ignored
    fn from_str(s: &str) -> GexResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" | "CALL" => Ok(OptionType::Call),
            "P" | "PUT" => Ok(OptionType::Put),
            other => Err(GexError::data(format!("unknown option type '{}'", other))),
        }
    }
}

/// One validated option row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    /// Underlying or contract ticker (e.g., "SPY")
    pub ticker: String,
    pub option_type: OptionType,
    /// Strike price, always > 0
    pub strike: f64,
    /// Gamma per contract
    pub gamma: f64,
    /// Open interest, always >= 0
    pub open_interest: f64,
}

impl OptionRecord {
    /// Build a record, rejecting non-finite numbers, non-positive strikes and
    /// negative open interest
    ///
    /// Strike is capped at [`MAX_PRICE`], open interest at [`MAX_VOLUME`] and
    /// |gamma| at [`MAX_GAMMA`], so notional exposure and its sums stay finite.
    pub fn new(
        ticker: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        gamma: f64,
        open_interest: f64,
    ) -> GexResult<Self> {
        if !strike.is_finite() || strike <= 0.0 || strike > MAX_PRICE {
            return Err(GexError::data(format!(
                "strike must be in (0, {}], got {}",
                MAX_PRICE, strike
            )));
        }
        if !gamma.is_finite() || gamma.abs() > MAX_GAMMA {
            return Err(GexError::data(format!(
                "gamma must be within +/-{}, got {}",
                MAX_GAMMA, gamma
            )));
        }
        if !open_interest.is_finite() || open_interest < 0.0 || open_interest > MAX_VOLUME {
            return Err(GexError::data(format!(
                "open interest must be in [0, {}], got {}",
                MAX_VOLUME, open_interest
            )));
        }

        Ok(Self {
            ticker: ticker.into(),
            option_type,
            strike,
            gamma,
            open_interest,
        })
    }

    /// Notional gamma exposure: gamma * OI * strike, negated for puts
    pub fn notional_exposure(&self) -> f64 {
        self.option_type.phi() * self.gamma * self.open_interest * self.strike
    }
}
