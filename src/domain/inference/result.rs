//! Inference outcome types

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::DomainError;

/// Binary fraud label produced by a classifier; on the wire it is the integer 0 or 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FraudLabel {
    Legitimate,
    Fraudulent,
}

impl FraudLabel {
    pub fn as_int(self) -> u8 {
        match self {
            Self::Legitimate => 0,
            Self::Fraudulent => 1,
        }
    }

    pub fn is_fraud(self) -> bool {
        self == Self::Fraudulent
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legitimate => "legitimate",
            Self::Fraudulent => "fraudulent",
        }
    }
}

impl TryFrom<i64> for FraudLabel {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legitimate),
            1 => Ok(Self::Fraudulent),
            other => Err(DomainError::classifier(format!(
                "classifier returned label {}, expected 0 or 1",
                other
            ))),
        }
    }
}

impl TryFrom<u8> for FraudLabel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legitimate),
            1 => Ok(Self::Fraudulent),
            other => Err(DomainError::classifier(format!(
                "label {} is not 0 or 1",
                other
            ))),
        }
    }
}

impl From<FraudLabel> for u8 {
    fn from(label: FraudLabel) -> Self {
        label.as_int()
    }
}

/// How a prediction ended, for logging and metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionOutcome {
    Legitimate,
    Fraudulent,
    UnknownCountry,
    Error,
}

impl PredictionOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legitimate => "legitimate",
            Self::Fraudulent => "fraudulent",
            Self::UnknownCountry => "unknown_country",
            Self::Error => "error",
        }
    }
}

impl From<FraudLabel> for PredictionOutcome {
    fn from(label: FraudLabel) -> Self {
        match label {
            FraudLabel::Legitimate => Self::Legitimate,
            FraudLabel::Fraudulent => Self::Fraudulent,
        }
    }
}

impl From<&DomainError> for PredictionOutcome {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::UnknownCountry { .. } => Self::UnknownCountry,
            _ => Self::Error,
        }
    }
}

/// Response contract of a single prediction: a label or an error, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InferenceResult {
    Scored {
        #[serde(rename = "isFraud")]
        is_fraud: FraudLabel,
    },
    Failed {
        error: String,
    },
}

/// Both keys as read off the wire, before the one-of check
#[derive(Deserialize)]
struct WireResult {
    #[serde(rename = "isFraud")]
    is_fraud: Option<FraudLabel>,
    error: Option<String>,
}

impl<'de> Deserialize<'de> for InferenceResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireResult::deserialize(deserializer)?;

        match (wire.is_fraud, wire.error) {
            (Some(label), None) => Ok(Self::scored(label)),
            (None, Some(error)) => Ok(Self::Failed { error }),
            (Some(_), Some(_)) => Err(D::Error::custom(
                "result carries both `isFraud` and `error`",
            )),
            (None, None) => Err(D::Error::custom(
                "result carries neither `isFraud` nor `error`",
            )),
        }
    }
}

impl InferenceResult {
    pub fn scored(label: FraudLabel) -> Self {
        Self::Scored { is_fraud: label }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            error: message.into(),
        }
    }

    /// Map a pipeline error to the caller-facing message
    pub fn from_error(err: &DomainError) -> Self {
        match err {
            DomainError::UnknownCountry { .. } => Self::failed(err.to_string()),
            DomainError::Validation(inner) => Self::failed(inner.to_string()),
            DomainError::Classifier { message } | DomainError::Internal { message } => {
                Self::failed(format!("Prediction error: {}", message))
            }
            other => Self::failed(format!("Prediction error: {}", other)),
        }
    }

    /// `Some(true)` when flagged as fraud, `None` for error results
    pub fn is_fraud(&self) -> Option<bool> {
        match self {
            Self::Scored { is_fraud } => Some(is_fraud.is_fraud()),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Scored { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionValidationError;
    use serde_json::json;

    #[test]
    fn test_label_from_int() {
        assert_eq!(FraudLabel::try_from(0i64).unwrap(), FraudLabel::Legitimate);
        assert_eq!(FraudLabel::try_from(1i64).unwrap(), FraudLabel::Fraudulent);

        let err = FraudLabel::try_from(7i64).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Classifier error: classifier returned label 7, expected 0 or 1"
        );
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(PredictionOutcome::from(FraudLabel::Fraudulent).as_str(), "fraudulent");
        assert_eq!(
            PredictionOutcome::from(&DomainError::unknown_country("Atlantis")),
            PredictionOutcome::UnknownCountry
        );
        assert_eq!(
            PredictionOutcome::from(&DomainError::classifier("bad")).as_str(),
            "error"
        );
    }

    #[test]
    fn test_scored_serialization() {
        let result = InferenceResult::scored(FraudLabel::Fraudulent);
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"isFraud": 1}));
        assert_eq!(result.is_fraud(), Some(true));
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_failed_serialization() {
        let result = InferenceResult::failed("Unknown country: Atlantis");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"error": "Unknown country: Atlantis"})
        );
        assert_eq!(result.is_fraud(), None);
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let scored: InferenceResult = serde_json::from_str(r#"{"isFraud":0}"#).unwrap();
        assert_eq!(scored, InferenceResult::scored(FraudLabel::Legitimate));

        let failed: InferenceResult = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn test_deserialize_rejects_labels_outside_zero_and_one() {
        let err = serde_json::from_str::<InferenceResult>(r#"{"isFraud": 7}"#).unwrap_err();
        assert!(err.to_string().contains("label 7 is not 0 or 1"));

        assert!(serde_json::from_str::<InferenceResult>(r#"{"isFraud": -1}"#).is_err());
        assert!(serde_json::from_str::<InferenceResult>(r#"{"isFraud": "1"}"#).is_err());
    }

    #[test]
    fn test_deserialize_requires_exactly_one_shape() {
        let both = serde_json::from_str::<InferenceResult>(r#"{"isFraud": 1, "error": "x"}"#);
        assert!(both.unwrap_err().to_string().contains("both"));

        let neither = serde_json::from_str::<InferenceResult>(r#"{"status": "ok"}"#);
        assert!(neither.unwrap_err().to_string().contains("neither"));

        assert!(serde_json::from_str::<InferenceResult>("[1]").is_err());
    }

    #[test]
    fn test_label_wire_form() {
        assert_eq!(serde_json::to_value(FraudLabel::Fraudulent).unwrap(), json!(1));
        assert_eq!(FraudLabel::try_from(0u8).unwrap(), FraudLabel::Legitimate);
        assert!(FraudLabel::try_from(2u8).is_err());
    }

    #[test]
    fn test_from_error_messages() {
        let unknown = InferenceResult::from_error(&DomainError::unknown_country("Atlantis"));
        assert_eq!(unknown.error(), Some("Unknown country: Atlantis"));

        let internal = InferenceResult::from_error(&DomainError::classifier("shape mismatch"));
        assert_eq!(internal.error(), Some("Prediction error: shape mismatch"));

        let validation = InferenceResult::from_error(&DomainError::Validation(
            TransactionValidationError::MissingField { field: "amount" },
        ));
        assert_eq!(validation.error(), Some("Field 'amount' is required"));
    }
}
