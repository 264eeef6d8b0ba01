//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing
//! - Delta and gamma
//! - Implied volatility solver (Newton-Raphson with bisection fallback)
//!
//! Every function here is total: degenerate inputs resolve to a documented
//! fallback instead of an error. Callers that need to know whether a value was
//! actually computed use [`value`] and [`implied_volatility`], which carry a
//! status next to the number.

use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;

use crate::core::{Greeks, OptionType};

/// Added to `vol * sqrt(t)` (and `spot * vol * sqrt(t)`) before dividing
pub const DENOM_EPSILON: f64 = 1e-10;

/// Lower bound of the implied volatility search interval
pub const IV_LOWER_BOUND: f64 = 0.001;
/// Upper bound of the implied volatility search interval
pub const IV_UPPER_BOUND: f64 = 2.0;
/// Volatility reported when the solver cannot produce an answer
pub const IV_DEFAULT: f64 = 0.2;

const IV_TOLERANCE: f64 = 1e-8;
const IV_MAX_ITER: usize = 100;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter (epsilon-guarded denominator)
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt() + DENOM_EPSILON)
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, vol, time) - vol * time.sqrt()
}

/// Whether the closed form is undefined for these inputs
pub fn is_degenerate(spot: f64, strike: f64, vol: f64, time: f64) -> bool {
    let finite = [spot, strike, vol, time].iter().all(|v| v.is_finite());
    !finite || time <= 0.0 || vol <= 0.0 || spot <= 0.0 || strike <= 0.0
}

/// Outcome of a pricing call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationStatus {
    /// Closed form evaluated
    Computed,
    /// Inputs outside the model's domain, price set to 0 by convention
    Degenerate,
}

/// Price together with how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub price: f64,
    pub status: ValuationStatus,
}

/// Black-Scholes European option price with status
pub fn value(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> Valuation {
    if is_degenerate(spot, strike, vol, time) {
        return Valuation {
            price: 0.0,
            status: ValuationStatus::Degenerate,
        };
    }

    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d2(spot, strike, rate, vol, time);
    let df = (-rate * time).exp();

    let price = match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionType::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };

    Valuation {
        price,
        status: ValuationStatus::Computed,
    }
}

/// Black-Scholes European option price
///
/// Returns 0.0 when `time <= 0` or `vol <= 0` (and for non-positive spot or
/// strike).
pub fn price(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> f64 {
    value(spot, strike, rate, vol, time, option_type).price
}

/// Option delta
///
/// Non-positive spot or strike gives 0.0.
pub fn delta(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> f64 {
    if spot <= 0.0 || strike <= 0.0 {
        return 0.0;
    }

    let n = norm_cdf(d1(spot, strike, rate, vol, time));
    match option_type {
        OptionType::Call => n,
        OptionType::Put => n - 1.0,
    }
}

/// Option gamma (same for call and put)
pub fn gamma(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if spot <= 0.0 || strike <= 0.0 {
        return 0.0;
    }

    let d1 = d1(spot, strike, rate, vol, time);
    norm_pdf(d1) / (spot * vol * time.sqrt() + DENOM_EPSILON)
}

/// Delta, gamma and vega in one pass
pub fn greeks(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> Greeks {
    if spot <= 0.0 || strike <= 0.0 {
        return Greeks::default();
    }

    let vega = if time > 0.0 {
        spot * norm_pdf(d1(spot, strike, rate, vol, time)) * time.sqrt()
    } else {
        0.0
    };

    Greeks::new(
        delta(spot, strike, rate, vol, time, option_type),
        gamma(spot, strike, rate, vol, time),
        vega,
    )
}

/// How the implied volatility was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IvStatus {
    /// Root found inside the search interval
    Converged,
    /// Root found outside the interval and clamped onto it
    Clamped,
    /// No root; the default volatility is reported instead
    Defaulted,
}

/// Implied volatility with solver status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvSolution {
    pub volatility: f64,
    pub status: IvStatus,
    pub iterations: usize,
}

impl IvSolution {
    fn defaulted(iterations: usize) -> Self {
        Self {
            volatility: IV_DEFAULT,
            status: IvStatus::Defaulted,
            iterations,
        }
    }

    pub fn is_converged(&self) -> bool {
        !matches!(self.status, IvStatus::Defaulted)
    }
}

/// Implied volatility solver using Newton-Raphson with bisection fallback
///
/// Never fails: if no volatility in [0.001, 2.0] reproduces `market_price`,
/// the result is [`IV_DEFAULT`] with status [`IvStatus::Defaulted`].
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    option_type: OptionType,
) -> IvSolution {
    if !market_price.is_finite() || market_price <= 0.0 || is_degenerate(spot, strike, 1.0, time) {
        tracing::debug!(market_price, spot, strike, time, "IV inputs degenerate, using default");
        return IvSolution::defaulted(0);
    }

    // Newton-Raphson from the default guess
    let mut vol = IV_DEFAULT;
    let mut iterations = 0;

    while iterations < IV_MAX_ITER {
        iterations += 1;
        let diff = price(spot, strike, rate, vol, time, option_type) - market_price;

        if diff.abs() < IV_TOLERANCE {
            let clamped = vol.clamp(IV_LOWER_BOUND, IV_UPPER_BOUND);
            let status = if clamped == vol {
                IvStatus::Converged
            } else {
                IvStatus::Clamped
            };
            return IvSolution {
                volatility: clamped,
                status,
                iterations,
            };
        }

        let vega = spot * norm_pdf(d1(spot, strike, rate, vol, time)) * time.sqrt();
        if vega.abs() < 1e-12 {
            break; // Vega too small, switch to bisection
        }

        let new_vol = vol - diff / vega;
        if !new_vol.is_finite() || new_vol <= 0.0 || new_vol > 5.0 {
            break; // Out of bounds, switch to bisection
        }
        vol = new_vol;
    }

    match bisection_iv(market_price, spot, strike, rate, time, option_type) {
        Some((vol, steps)) => IvSolution {
            volatility: vol,
            status: IvStatus::Converged,
            iterations: iterations + steps,
        },
        None => {
            tracing::warn!(
                market_price,
                spot,
                strike,
                time,
                "IV solver did not converge, using default volatility {}",
                IV_DEFAULT
            );
            IvSolution::defaulted(iterations)
        }
    }
}

/// Bisection on [IV_LOWER_BOUND, IV_UPPER_BOUND]; `None` if the target price
/// is not bracketed
fn bisection_iv(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    option_type: OptionType,
) -> Option<(f64, usize)> {
    let mut low = IV_LOWER_BOUND;
    let mut high = IV_UPPER_BOUND;

    let f_low = price(spot, strike, rate, low, time, option_type) - market_price;
    let f_high = price(spot, strike, rate, high, time, option_type) - market_price;
    if f_low > 0.0 || f_high < 0.0 {
        return None;
    }

    for step in 1..=IV_MAX_ITER {
        let mid = (low + high) / 2.0;
        let diff = price(spot, strike, rate, mid, time, option_type) - market_price;

        if diff.abs() < IV_TOLERANCE || (high - low) < IV_TOLERANCE {
            return Some((mid, step));
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}
