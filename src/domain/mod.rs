//! Domain layer - Transaction scoring entities and the inference pipeline

pub mod error;
pub mod inference;
pub mod transaction;

pub use error::DomainError;
pub use inference::{
    Classifier, CountryCode, CountryEncoder, FeatureVector, FraudLabel, InferencePipeline,
    InferenceResult, PredictionOutcome, FEATURE_COUNT, FEATURE_ORDER,
};
pub use transaction::{TransactionInput, TransactionRequest, TransactionValidationError};
