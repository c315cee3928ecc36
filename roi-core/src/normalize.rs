//! Boundary conversion from loosely typed request bodies to [`ScenarioInput`].
//!
//! Request bodies arrive as JSON objects whose numeric fields may be numbers,
//! numeric strings, empty strings, `null`, or missing. This module turns such
//! an object into a typed input before any calculation runs.
//!
//! | Raw value | Result |
//! |-----------|--------|
//! | missing, `null`, `""`, whitespace | `0` (the caller's default for `one_time_implementation_cost`) |
//! | JSON number | the number, exactly |
//! | numeric string (`"1,250.5"`, `" 12 "`, `"1e3"`) | the parsed number |
//! | anything else | [`InputError::InvalidNumber`] |

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::ScenarioInput;

/// The numeric fields read from a request body, in column order.
pub const NUMERIC_FIELDS: [&str; 8] = [
    "monthly_invoice_volume",
    "num_ap_staff",
    "avg_hours_per_invoice",
    "hourly_wage",
    "error_rate_manual",
    "error_cost",
    "time_horizon_months",
    "one_time_implementation_cost",
];

/// Error returned when a request field cannot be coerced to a number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("field '{field}' is not a number: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses decimal text, accepting plain and scientific notation.
fn parse_decimal_text(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Coerces a single raw value. `Ok(None)` means "treat as absent".
fn coerce_value(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<Decimal>, InputError> {
    let invalid = |value: &Value| InputError::InvalidNumber {
        field,
        value: value.to_string(),
    };

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => parse_decimal_text(&n.to_string())
            .map(Some)
            .ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::String(s)) => {
            let normalized = normalize_decimal_input(s);
            if normalized.is_empty() {
                return Ok(None);
            }
            parse_decimal_text(&normalized).map(Some).ok_or_else(|| {
                tracing::warn!(field, input = %s, "invalid numeric field");
                invalid(&Value::String(s.clone()))
            })
        }
        Some(other) => Err(invalid(other)),
    }
}

/// Reads one numeric field, falling back to `default` when it is absent.
fn numeric_field(
    body: &Map<String, Value>,
    field: &'static str,
    default: Decimal,
) -> Result<Decimal, InputError> {
    Ok(coerce_value(field, body.get(field))?.unwrap_or(default))
}

/// Converts a raw JSON object into a [`ScenarioInput`].
///
/// An absent `one_time_implementation_cost` takes `implementation_default`;
/// every other absent field is zero. Unknown keys (including
/// `scenario_name`) are ignored.
///
/// # Errors
///
/// Returns [`InputError::InvalidNumber`] for the first field whose value is
/// neither absent nor numeric.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::DEFAULT_IMPLEMENTATION_COST;
/// use roi_core::normalize::normalize_input;
///
/// let body = serde_json::json!({
///     "monthly_invoice_volume": "1,000",
///     "hourly_wage": 25,
///     "error_rate_manual": "",
/// });
///
/// let input = normalize_input(body.as_object().unwrap(), DEFAULT_IMPLEMENTATION_COST).unwrap();
///
/// assert_eq!(input.monthly_invoice_volume, dec!(1000));
/// assert_eq!(input.hourly_wage, dec!(25));
/// assert_eq!(input.error_rate_manual, dec!(0));
/// assert_eq!(input.one_time_implementation_cost, dec!(50000));
/// ```
pub fn normalize_input(
    body: &Map<String, Value>,
    implementation_default: Decimal,
) -> Result<ScenarioInput, InputError> {
    Ok(ScenarioInput {
        monthly_invoice_volume: numeric_field(body, NUMERIC_FIELDS[0], Decimal::ZERO)?,
        num_ap_staff: numeric_field(body, NUMERIC_FIELDS[1], Decimal::ZERO)?,
        avg_hours_per_invoice: numeric_field(body, NUMERIC_FIELDS[2], Decimal::ZERO)?,
        hourly_wage: numeric_field(body, NUMERIC_FIELDS[3], Decimal::ZERO)?,
        error_rate_manual: numeric_field(body, NUMERIC_FIELDS[4], Decimal::ZERO)?,
        error_cost: numeric_field(body, NUMERIC_FIELDS[5], Decimal::ZERO)?,
        time_horizon_months: numeric_field(body, NUMERIC_FIELDS[6], Decimal::ZERO)?,
        one_time_implementation_cost: numeric_field(body, NUMERIC_FIELDS[7], implementation_default)?,
    })
}
