//! Parsing and validation of analyze requests
//!
//! Field names follow the request format clients send: `current_price`,
//! `expiration_date` and `options`, with each option row carrying `ticker`,
//! `tipo` (or `type`), `strike`, `gamma` and `oi`.

use serde_json::{Map, Value};

use crate::config::Limits;
use crate::core::{GexError, GexResult, OptionRecord, OptionType};

/// A validated analyze request
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub current_price: f64,
    pub expiration_date: String,
    /// Rows that passed validation, in input order
    pub records: Vec<OptionRecord>,
    /// Rows dropped as malformed
    pub skipped_rows: usize,
}

impl AnalysisRequest {
    /// Validate a raw request
    ///
    /// Missing or malformed top-level fields fail immediately. Malformed
    /// option rows are skipped with a warning; if none survive the request
    /// fails.
    pub fn from_value(request: &Value, limits: &Limits) -> GexResult<Self> {
        let body = request
            .as_object()
            .ok_or_else(|| GexError::validation("No data provided"))?;

        let (price, expiration, options) = match (
            body.get("current_price").filter(|v| !v.is_null()),
            body.get("expiration_date").filter(|v| !v.is_null()),
            body.get("options").filter(|v| !v.is_null()),
        ) {
            (Some(p), Some(e), Some(o)) => (p, e, o),
            _ => {
                return Err(GexError::validation(
                    "Missing required fields: current_price, expiration_date, options",
                ))
            }
        };

        let current_price = number(price)
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| GexError::validation("Invalid current_price value"))?;

        let expiration_date = expiration
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GexError::validation("Invalid expiration_date value"))?
            .to_string();

        let rows = options
            .as_array()
            .filter(|rows| !rows.is_empty())
            .ok_or_else(|| GexError::validation("Options must be a non-empty list"))?;

        if rows.len() > limits.max_options {
            return Err(GexError::validation(format!(
                "Too many options: {} > {}",
                rows.len(),
                limits.max_options
            )));
        }

        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match parse_row(row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(row = i, error = %e, "skipping invalid option row"),
            }
        }

        if records.is_empty() {
            return Err(GexError::validation("No valid options data found"));
        }

        Ok(Self {
            current_price,
            expiration_date,
            skipped_rows: rows.len() - records.len(),
            records,
        })
    }
}

/// Number or numeric string
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_row(row: &Value) -> GexResult<OptionRecord> {
    let fields = row
        .as_object()
        .ok_or_else(|| GexError::data("option row is not an object"))?;

    let option_type: OptionType = fields
        .get("tipo")
        .or_else(|| fields.get("type"))
        .and_then(Value::as_str)
        .ok_or_else(|| GexError::data("option row has no type"))?
        .parse()?;

    let ticker = fields
        .get("ticker")
        .and_then(Value::as_str)
        .unwrap_or("N/A");

    OptionRecord::new(
        ticker,
        option_type,
        required_number(fields, "strike")?,
        optional_number(fields, "gamma")?,
        optional_number(fields, "oi")?,
    )
}

fn required_number(fields: &Map<String, Value>, name: &str) -> GexResult<f64> {
    let value = fields
        .get(name)
        .ok_or_else(|| GexError::data(format!("option row has no {}", name)))?;
    number(value).ok_or_else(|| GexError::data(format!("{} is not numeric: {}", name, value)))
}

/// Absent or null reads as zero
fn optional_number(fields: &Map<String, Value>, name: &str) -> GexResult<f64> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(0.0),
        Some(value) => number(value)
            .ok_or_else(|| GexError::data(format!("{} is not numeric: {}", name, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(request: Value) -> GexResult<AnalysisRequest> {
        AnalysisRequest::from_value(&request, &Limits::default())
    }

    #[test]
    fn test_valid_request() {
        let req = parse(json!({
            "current_price": "100.5",
            "expiration_date": "2024-02-16",
            "options": [
                { "ticker": "SPY", "tipo": "call", "strike": 100, "gamma": 0.28, "oi": 12000 },
                { "type": "P", "strike": "99", "gamma": 0.1, "oi": 50 }
            ]
        }))
        .unwrap();

        assert_eq!(req.current_price, 100.5);
        assert_eq!(req.expiration_date, "2024-02-16");
        assert_eq!(req.records.len(), 2);
        assert_eq!(req.skipped_rows, 0);
        assert_eq!(req.records[0].option_type, OptionType::Call);
        assert_eq!(req.records[1].option_type, OptionType::Put);
        assert_eq!(req.records[1].ticker, "N/A");
        assert_eq!(req.records[1].strike, 99.0);
    }

    #[test]
    fn test_missing_fields() {
        for request in [
            json!(null),
            json!([]),
            json!({ "expiration_date": "2024-02-16", "options": [] }),
            json!({ "current_price": 100, "options": [{}] }),
            json!({ "current_price": 100, "expiration_date": "2024-02-16" }),
        ] {
            let err = parse(request).unwrap_err();
            assert!(err.is_validation(), "{}", err);
        }
    }

    #[test]
    fn test_bad_top_level_values() {
        let base = |price: Value, expiry: Value, options: Value| {
            parse(json!({ "current_price": price, "expiration_date": expiry, "options": options }))
        };
        let row = json!([{ "tipo": "CALL", "strike": 100, "gamma": 0.1, "oi": 1 }]);

        assert!(base(json!("abc"), json!("2024-02-16"), row.clone()).is_err());
        assert!(base(json!(-5), json!("2024-02-16"), row.clone()).is_err());
        assert!(base(json!(0), json!("2024-02-16"), row.clone()).is_err());
        assert!(base(json!(100), json!("   "), row.clone()).is_err());
        assert!(base(json!(100), json!(20240216), row.clone()).is_err());
        assert!(base(json!(100), json!("2024-02-16"), json!([])).is_err());
        assert!(base(json!(100), json!("2024-02-16"), json!({ "a": 1 })).is_err());
        assert!(base(json!(100), json!("2024-02-16"), row).is_ok());
    }

    #[test]
    fn test_partial_success() {
        let req = parse(json!({
            "current_price": 100,
            "expiration_date": "2024-02-16",
            "options": [
                { "tipo": "CALL", "strike": 100, "gamma": 0.28, "oi": 12000 },
                { "tipo": "STRADDLE", "strike": 100, "gamma": 0.1, "oi": 1 },
                { "tipo": "PUT", "strike": "abc", "gamma": 0.1, "oi": 1 },
                { "tipo": "PUT", "strike": -1, "gamma": 0.1, "oi": 1 },
                "not a row"
            ]
        }))
        .unwrap();

        assert_eq!(req.records.len(), 1);
        assert_eq!(req.skipped_rows, 4);
    }

    #[test]
    fn test_all_rows_invalid() {
        let err = parse(json!({
            "current_price": 100,
            "expiration_date": "2024-02-16",
            "options": [{ "tipo": "CALL" }, { "strike": 100 }]
        }))
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_row_cap() {
        let limits = Limits {
            max_options: 1,
            ..Limits::default()
        };
        let request = json!({
            "current_price": 100,
            "expiration_date": "2024-02-16",
            "options": [
                { "tipo": "CALL", "strike": 100, "gamma": 0.1, "oi": 1 },
                { "tipo": "PUT", "strike": 100, "gamma": 0.1, "oi": 1 }
            ]
        });
        assert!(AnalysisRequest::from_value(&request, &limits)
            .unwrap_err()
            .is_validation());
    }
}
