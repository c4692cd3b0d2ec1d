//! Inference pipeline: encoding, feature assembly, classification, result shaping

mod classifier;
mod encoder;
mod features;
mod pipeline;
mod result;

pub use classifier::Classifier;
#[cfg(test)]
pub use classifier::MockClassifier;
pub use encoder::{CountryCode, CountryEncoder};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_ORDER};
pub use pipeline::InferencePipeline;
pub use result::{FraudLabel, InferenceResult, PredictionOutcome};
