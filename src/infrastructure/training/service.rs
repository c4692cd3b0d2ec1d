//! Builds the classifier and encoder artifacts from labeled transactions

use tracing::info;

use super::dataset::LabeledTransaction;
use crate::domain::{
    CountryEncoder, DomainError, FeatureVector, InferenceResult, TransactionRequest,
    FEATURE_COUNT, FEATURE_ORDER,
};
use crate::infrastructure::artifacts::ModelArtifacts;
use crate::infrastructure::forest::{ForestParams, ForestTrainer};

/// Transactions scored after every training run as a sanity check
pub const REFERENCE_CASES: [(f64, &str, i64); 3] = [
    (25.0, "United States", 14),
    (50000.0, "Iran", 2),
    (100.0, "Canada", 10),
];

/// Trains the artifact pair consumed by the inference pipeline
#[derive(Debug, Clone, Default)]
pub struct ModelProducer {
    trainer: ForestTrainer,
}

impl ModelProducer {
    pub fn new(params: ForestParams) -> Self {
        Self {
            trainer: ForestTrainer::new(params),
        }
    }

    /// Fit the encoder over the dataset's countries, then the forest over rows
    /// assembled exactly as the pipeline assembles them at request time
    pub fn train(&self, dataset: &[LabeledTransaction]) -> Result<ModelArtifacts, DomainError> {
        let encoder =
            CountryEncoder::fit(dataset.iter().map(|s| s.transaction.country.as_str()))?;

        let rows = dataset
            .iter()
            .map(|sample| {
                let t = &sample.transaction;
                let code = encoder.encode(&t.country)?;
                Ok(FeatureVector::new(t.amount, t.hour, code).as_row())
            })
            .collect::<Result<Vec<[f64; FEATURE_COUNT]>, DomainError>>()?;

        let labels: Vec<i64> = dataset
            .iter()
            .map(|sample| i64::from(sample.label.as_int()))
            .collect();

        let forest = self.trainer.fit(&FEATURE_ORDER, &rows, &labels)?;

        info!(
            samples = dataset.len(),
            countries = encoder.len(),
            trees = forest.tree_count(),
            "Model artifacts trained"
        );

        Ok(ModelArtifacts { encoder, forest })
    }

    /// Score [`REFERENCE_CASES`] against freshly trained artifacts
    pub fn smoke_test(
        &self,
        artifacts: &ModelArtifacts,
    ) -> Vec<(TransactionRequest, InferenceResult)> {
        let pipeline = artifacts.clone().into_pipeline();

        REFERENCE_CASES
            .iter()
            .map(|&(amount, country, hour)| {
                let request = TransactionRequest::new(amount, country, hour);
                let result = pipeline.predict(&request);
                let verdict = match result.is_fraud() {
                    Some(true) => "fraudulent",
                    Some(false) => "legitimate",
                    None => "error",
                };

                info!(amount, country, hour, verdict, "Reference prediction");

                (request, result)
            })
            .collect()
    }
}
