//! Transaction request entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::{coerce_amount, coerce_country, coerce_hour, TransactionValidationError};

/// Untrusted transaction payload as received on the wire.
///
/// Every field is kept as a raw JSON value so that coercion failures can be
/// reported per field instead of as an opaque deserialization error. Only a
/// JSON object is accepted; `null` fields count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct TransactionInput {
    pub amount: Option<Value>,
    pub country: Option<Value>,
    pub hour: Option<Value>,
}

impl From<Map<String, Value>> for TransactionInput {
    fn from(mut object: Map<String, Value>) -> Self {
        let mut take = |field: &str| object.remove(field).filter(|value| !value.is_null());

        Self {
            amount: take("amount"),
            country: take("country"),
            hour: take("hour"),
        }
    }
}

impl TransactionInput {
    /// Structurally validate the payload into a typed request
    pub fn validate(self) -> Result<TransactionRequest, TransactionValidationError> {
        let amount = required(self.amount.as_ref(), "amount").and_then(coerce_amount)?;
        let country = required(self.country.as_ref(), "country").and_then(coerce_country)?;
        let hour = required(self.hour.as_ref(), "hour").and_then(coerce_hour)?;

        Ok(TransactionRequest {
            amount,
            country,
            hour,
        })
    }
}

fn required<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<&'a Value, TransactionValidationError> {
    value.ok_or(TransactionValidationError::MissingField { field })
}

/// A structurally valid transaction, ready for scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRequest {
    /// Amount in currency units
    pub amount: f64,
    /// Country label as sent by the caller
    pub country: String,
    /// Hour of day; expected 0-23 but not enforced
    pub hour: i64,
}

impl TransactionRequest {
    pub fn new(amount: f64, country: impl Into<String>, hour: i64) -> Self {
        Self {
            amount,
            country: country.into(),
            hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> TransactionInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_well_formed_input() {
        let request = input(json!({"amount": 25, "country": "United States", "hour": 14}))
            .validate()
            .unwrap();

        assert_eq!(request, TransactionRequest::new(25.0, "United States", 14));
    }

    #[test]
    fn test_validate_coerces_string_fields() {
        let request = input(json!({"amount": "100.25", "country": "Canada", "hour": "9"}))
            .validate()
            .unwrap();

        assert_eq!(request.amount, 100.25);
        assert_eq!(request.hour, 9);
    }

    #[test]
    fn test_validate_rejects_malformed_amount() {
        let err = input(json!({"amount": "abc", "country": "Canada", "hour": 10}))
            .validate()
            .unwrap_err();

        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let err = input(json!({"amount": 10, "hour": 3})).validate().unwrap_err();
        assert_eq!(err, TransactionValidationError::MissingField { field: "country" });

        let err = input(json!({"amount": 10, "country": "Canada", "hour": null}))
            .validate()
            .unwrap_err();
        assert_eq!(err, TransactionValidationError::MissingField { field: "hour" });
    }

    #[test]
    fn test_only_objects_are_accepted() {
        assert!(serde_json::from_value::<TransactionInput>(json!([50000, "Iran", 2])).is_err());
        assert!(serde_json::from_value::<TransactionInput>(json!("amount")).is_err());
        assert!(serde_json::from_value::<TransactionInput>(json!(null)).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let request = input(json!({
            "amount": 1, "country": "France", "hour": 1, "merchant": "acme"
        }))
        .validate()
        .unwrap();

        assert_eq!(request.country, "France");
    }

    #[test]
    fn test_request_serializes_wire_shape() {
        let json = serde_json::to_value(TransactionRequest::new(50000.0, "Iran", 2)).unwrap();
        assert_eq!(json, json!({"amount": 50000.0, "country": "Iran", "hour": 2}));
    }
}
