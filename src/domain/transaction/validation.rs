//! Field coercion for untrusted transaction input

use serde_json::Value;
use thiserror::Error;

/// Transaction validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransactionValidationError {
    /// Field absent or null
    #[error("Field '{field}' is required")]
    MissingField { field: &'static str },

    /// Field could not be read as a real number
    #[error("Field '{field}' must be a valid number, got {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// Field could not be read as an integer
    #[error("Field '{field}' must be a valid integer, got {value}")]
    InvalidInteger { field: &'static str, value: String },

    /// Field is not a string
    #[error("Field '{field}' must be a string, got {value}")]
    InvalidString { field: &'static str, value: String },
}

impl TransactionValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidNumber { field, .. }
            | Self::InvalidInteger { field, .. }
            | Self::InvalidString { field, .. } => *field,
        }
    }
}

/// Read `amount` as a finite real number (JSON number or numeric string)
pub fn coerce_amount(value: &Value) -> Result<f64, TransactionValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| TransactionValidationError::InvalidNumber {
            field: "amount",
            value: value.to_string(),
        })
}

/// Read `country` as text; only JSON strings qualify
pub fn coerce_country(value: &Value) -> Result<String, TransactionValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(TransactionValidationError::InvalidString {
            field: "country",
            value: other.to_string(),
        }),
    }
}

/// Read `hour` as an integer (JSON integer, integral float, or integer string).
/// The 0-23 range is intentionally not enforced.
pub fn coerce_hour(value: &Value) -> Result<i64, TransactionValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| TransactionValidationError::InvalidInteger {
        field: "hour",
        value: value.to_string(),
    })
}

fn integral_f64(v: f64) -> Option<i64> {
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;

    if v.is_finite() && v.fract() == 0.0 && in_range {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_amount_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_amount(&json!(25)).unwrap(), 25.0);
        assert_eq!(coerce_amount(&json!(49.99)).unwrap(), 49.99);
        assert_eq!(coerce_amount(&json!(" 1200.5 ")).unwrap(), 1200.5);
    }

    #[test]
    fn test_coerce_amount_keeps_negative_values() {
        assert_eq!(coerce_amount(&json!(-10)).unwrap(), -10.0);
    }

    #[test]
    fn test_coerce_amount_rejects_garbage() {
        let err = coerce_amount(&json!("abc")).unwrap_err();
        assert_eq!(
            err,
            TransactionValidationError::InvalidNumber {
                field: "amount",
                value: "\"abc\"".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Field 'amount' must be a valid number, got \"abc\""
        );

        assert!(coerce_amount(&json!(true)).is_err());
        assert!(coerce_amount(&json!([1, 2])).is_err());
        assert!(coerce_amount(&json!("NaN")).is_err());
        assert!(coerce_amount(&json!("inf")).is_err());
    }

    #[test]
    fn test_coerce_country_requires_string() {
        assert_eq!(coerce_country(&json!("Canada")).unwrap(), "Canada");

        let err = coerce_country(&json!(42)).unwrap_err();
        assert_eq!(err.field(), "country");
        assert_eq!(err.to_string(), "Field 'country' must be a string, got 42");
    }

    #[test]
    fn test_coerce_hour_accepts_integral_values() {
        assert_eq!(coerce_hour(&json!(14)).unwrap(), 14);
        assert_eq!(coerce_hour(&json!(2.0)).unwrap(), 2);
        assert_eq!(coerce_hour(&json!("10")).unwrap(), 10);
    }

    #[test]
    fn test_coerce_hour_does_not_enforce_range() {
        assert_eq!(coerce_hour(&json!(42)).unwrap(), 42);
        assert_eq!(coerce_hour(&json!(-1)).unwrap(), -1);
    }

    #[test]
    fn test_coerce_hour_rejects_fractions_and_text() {
        assert!(coerce_hour(&json!(10.5)).is_err());
        assert!(coerce_hour(&json!("ten")).is_err());
        assert!(coerce_hour(&json!("10.5")).is_err());
        assert!(coerce_hour(&json!(1e300)).is_err());

        let err = coerce_hour(&json!(null)).unwrap_err();
        assert_eq!(err.field(), "hour");
    }
}
