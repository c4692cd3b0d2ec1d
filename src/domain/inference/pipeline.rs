//! Request-time scoring pipeline

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error, warn};

use super::classifier::Classifier;
use super::encoder::CountryEncoder;
use super::features::FeatureVector;
use super::result::{FraudLabel, InferenceResult, PredictionOutcome};
use crate::domain::transaction::{TransactionInput, TransactionRequest, TransactionValidationError};
use crate::domain::DomainError;

/// Scores transactions against artifacts loaded once at startup.
///
/// Holds no per-call state; cloning shares the same read-only artifacts.
#[derive(Clone)]
pub struct InferencePipeline {
    encoder: Arc<CountryEncoder>,
    classifier: Arc<dyn Classifier>,
}

impl InferencePipeline {
    pub fn new(encoder: Arc<CountryEncoder>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            encoder,
            classifier,
        }
    }

    pub fn encoder(&self) -> &CountryEncoder {
        &self.encoder
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Encode the country and lay the request out as a feature row
    pub fn assemble(&self, request: &TransactionRequest) -> Result<FeatureVector, DomainError> {
        let country_code = self.encoder.encode(&request.country)?;
        Ok(FeatureVector::new(request.amount, request.hour, country_code))
    }

    /// Run encoding and classification, surfacing every failure as a typed error
    pub fn score(&self, request: &TransactionRequest) -> Result<FraudLabel, DomainError> {
        let features = self.assemble(request)?;
        let raw = self.classifier.predict(&features.as_row())?;

        FraudLabel::try_from(raw)
    }

    /// Score a validated request. Never fails and never panics: every outcome,
    /// including a panicking classifier, ends up as an [`InferenceResult`].
    pub fn predict(&self, request: &TransactionRequest) -> InferenceResult {
        self.predict_with_outcome(request).0
    }

    /// [`predict`](Self::predict), also reporting how the call ended
    pub fn predict_with_outcome(
        &self,
        request: &TransactionRequest,
    ) -> (InferenceResult, PredictionOutcome) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.score(request)))
            .unwrap_or_else(|payload| Err(DomainError::internal(panic_message(&*payload))));

        match outcome {
            Ok(label) => {
                debug!(
                    amount = request.amount,
                    country = %request.country,
                    hour = request.hour,
                    label = label.as_str(),
                    "Transaction scored"
                );
                (InferenceResult::scored(label), label.into())
            }
            Err(err @ DomainError::UnknownCountry { .. }) => {
                warn!(country = %request.country, "Rejected transaction with unknown country");
                (InferenceResult::from_error(&err), (&err).into())
            }
            Err(err) => {
                error!(
                    amount = request.amount,
                    country = %request.country,
                    hour = request.hour,
                    error = %err,
                    "Prediction failed"
                );
                (InferenceResult::from_error(&err), (&err).into())
            }
        }
    }

    /// Validate raw wire input, then score it.
    ///
    /// Validation failures are returned as `Err` so the transport can treat them
    /// as client errors; everything past validation is folded into the result.
    pub fn predict_input(
        &self,
        input: TransactionInput,
    ) -> Result<(InferenceResult, PredictionOutcome), TransactionValidationError> {
        let request = input.validate()?;
        Ok(self.predict_with_outcome(&request))
    }
}

impl fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("vocabulary", &self.encoder.len())
            .field("feature_count", &self.classifier.feature_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "classifier panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inference::MockClassifier;
    use serde_json::json;

    fn encoder() -> Arc<CountryEncoder> {
        Arc::new(CountryEncoder::fit(["Canada", "Iran", "United States"]).unwrap())
    }

    fn pipeline(classifier: MockClassifier) -> InferencePipeline {
        InferencePipeline::new(encoder(), Arc::new(classifier))
    }

    #[test]
    fn test_known_country_is_scored() {
        let mut classifier = MockClassifier::new();
        classifier
            .expect_predict()
            .withf(|row| *row == [50000.0, 2.0, 1.0])
            .times(1)
            .returning(|_| Ok(1));

        let result = pipeline(classifier).predict(&TransactionRequest::new(50000.0, "Iran", 2));
        assert_eq!(result, InferenceResult::scored(FraudLabel::Fraudulent));
    }

    #[test]
    fn test_unknown_country_never_reaches_classifier() {
        let mut classifier = MockClassifier::new();
        classifier.expect_predict().never();

        let result =
            pipeline(classifier).predict(&TransactionRequest::new(100.0, "Atlantis", 10));
        assert_eq!(result, InferenceResult::failed("Unknown country: Atlantis"));
    }

    #[test]
    fn test_outcome_distinguishes_unknown_country_from_failure() {
        let mut classifier = MockClassifier::new();
        classifier
            .expect_predict()
            .returning(|_| Err(DomainError::classifier("broken")));
        let pipeline = pipeline(classifier);

        let (_, unknown) = pipeline.predict_with_outcome(&TransactionRequest::new(1.0, "Mars", 1));
        assert_eq!(unknown, PredictionOutcome::UnknownCountry);

        let (_, failed) = pipeline.predict_with_outcome(&TransactionRequest::new(1.0, "Iran", 1));
        assert_eq!(failed, PredictionOutcome::Error);
    }

    #[test]
    fn test_classifier_error_becomes_prediction_error() {
        let mut classifier = MockClassifier::new();
        classifier
            .expect_predict()
            .returning(|_| Err(DomainError::classifier("expected 4 features, got 3")));

        let result = pipeline(classifier).predict(&TransactionRequest::new(10.0, "Canada", 9));
        assert_eq!(
            result.error(),
            Some("Prediction error: expected 4 features, got 3")
        );
    }

    #[test]
    fn test_unexpected_label_becomes_prediction_error() {
        let mut classifier = MockClassifier::new();
        classifier.expect_predict().returning(|_| Ok(2));

        let result = pipeline(classifier).predict(&TransactionRequest::new(10.0, "Canada", 9));
        assert_eq!(
            result.error(),
            Some("Prediction error: classifier returned label 2, expected 0 or 1")
        );
        assert_eq!(result.is_fraud(), None);
    }

    struct PanickingClassifier;

    impl Classifier for PanickingClassifier {
        fn predict(&self, _row: &[f64]) -> Result<i64, DomainError> {
            panic!("tree index out of bounds")
        }

        fn feature_count(&self) -> usize {
            3
        }
    }

    #[test]
    fn test_panicking_classifier_is_contained() {
        let pipeline = InferencePipeline::new(encoder(), Arc::new(PanickingClassifier));

        let result = pipeline.predict(&TransactionRequest::new(10.0, "Canada", 9));
        assert_eq!(
            result.error(),
            Some("Prediction error: tree index out of bounds")
        );
    }

    #[test]
    fn test_predict_is_deterministic() {
        let mut classifier = MockClassifier::new();
        classifier
            .expect_predict()
            .times(2)
            .returning(|row| Ok(i64::from(row[0] > 1000.0)));

        let pipeline = pipeline(classifier);
        let request = TransactionRequest::new(25.0, "United States", 14);

        assert_eq!(pipeline.predict(&request), pipeline.predict(&request));
    }

    #[test]
    fn test_predict_input_rejects_malformed_payload() {
        let mut classifier = MockClassifier::new();
        classifier.expect_predict().never();

        let input: TransactionInput =
            serde_json::from_value(json!({"amount": "abc", "country": "Canada", "hour": 10}))
                .unwrap();

        let err = pipeline(classifier).predict_input(input).unwrap_err();
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn test_predict_input_scores_valid_payload() {
        let mut classifier = MockClassifier::new();
        classifier.expect_predict().returning(|_| Ok(0));

        let input: TransactionInput =
            serde_json::from_value(json!({"amount": 25, "country": "United States", "hour": 14}))
                .unwrap();

        let (result, outcome) = pipeline(classifier).predict_input(input).unwrap();
        assert_eq!(result, InferenceResult::scored(FraudLabel::Legitimate));
        assert_eq!(outcome, PredictionOutcome::Legitimate);
    }

    #[test]
    fn test_assemble_uses_encoder_codes() {
        let mut classifier = MockClassifier::new();
        classifier.expect_predict().never();

        let features = pipeline(classifier)
            .assemble(&TransactionRequest::new(25.0, "United States", 14))
            .unwrap();
        assert_eq!(features.as_row(), [25.0, 14.0, 2.0]);
    }
}
