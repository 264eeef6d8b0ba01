//! Core data types for GEX analytics
//!
//! Defines fundamental types:
//! - OptionRecord: ticker, type (call/put), strike, gamma, open interest
//! - OhlcBar / BarSeries: historical price and volume series
//! - Greeks: delta, gamma, vega
//! - GexError: crate-wide error type

pub mod bar;
pub mod error;
pub mod greeks;
pub mod option;
pub mod stats;

pub use bar::*;
pub use error::*;
pub use greeks::*;
pub use option::*;
