use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Timelike};
use tracing::{debug, warn};

use crate::domain::{DomainError, FraudLabel, InferenceResult, TransactionRequest};

/// Anything that can score a transaction (for mocking)
#[async_trait]
pub trait FraudScorer: Send + Sync {
    async fn score(&self, request: &TransactionRequest) -> Result<InferenceResult, DomainError>;
}

/// Calls `POST {base_url}/predict` on a running scoring service
#[derive(Debug, Clone)]
pub struct FraudScoringClient {
    client: reqwest::Client,
    base_url: String,
}

impl FraudScoringClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    /// Score a transaction, taking `hour` from the timestamp in its own time zone
    pub async fn score_at<Tz>(
        &self,
        amount: f64,
        country: &str,
        timestamp: DateTime<Tz>,
    ) -> Result<InferenceResult, DomainError>
    where
        Tz: TimeZone,
    {
        let request = TransactionRequest::new(amount, country, i64::from(timestamp.hour()));
        self.score(&request).await
    }

    /// Like [`score_at`](Self::score_at), but a failed call or an unreadable reply
    /// yields a "not fraud" verdict so callers are never blocked by the scoring
    /// service. Well-formed error payloads are passed through untouched.
    pub async fn score_or_default<Tz>(
        &self,
        amount: f64,
        country: &str,
        timestamp: DateTime<Tz>,
    ) -> InferenceResult
    where
        Tz: TimeZone,
    {
        match self.score_at(amount, country, timestamp).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Scoring service failed, treating transaction as legitimate");
                InferenceResult::scored(FraudLabel::Legitimate)
            }
        }
    }
}

#[async_trait]
impl FraudScorer for FraudScoringClient {
    async fn score(&self, request: &TransactionRequest) -> Result<InferenceResult, DomainError> {
        let url = self.predict_url();
        debug!(url = %url, country = %request.country, "Requesting fraud score");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::scoring_service(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::scoring_service(format!(
                "HTTP {}: {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::scoring_service(format!("Failed to parse response: {}", e)))
    }
}
