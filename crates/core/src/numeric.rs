//! Numeric coercion for loosely typed spreadsheet and JSON values

use serde_json::Value;

/// Parse a string that should hold a number ("1232", " 123.2 ").
/// NaN and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numbers pass through, numeric strings are parsed, anything else is None
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}
