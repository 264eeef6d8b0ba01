//! Option Pricing Models
//!
//! Implements:
//! - Black-Scholes (closed-form price, delta, gamma, IV computation)

pub mod black_scholes;

pub use black_scholes::*;
