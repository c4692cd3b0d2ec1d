//! Fraud scoring endpoint

use std::time::Instant;

use axum::{extract::State, http::StatusCode};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{InferenceResult, TransactionInput};
use crate::infrastructure::observability::record_prediction;

/// POST /predict
///
/// Malformed input is rejected with 422. Once the input is valid the answer is
/// always 200, carrying either `isFraud` or an `error` message.
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<TransactionInput>,
) -> Result<(StatusCode, Json<InferenceResult>), ApiError> {
    let start = Instant::now();

    let (result, outcome) = state.pipeline.predict_input(input).map_err(|e| {
        debug!(field = e.field(), error = %e, "Rejected malformed transaction");
        ApiError::from(e)
    })?;

    record_prediction(outcome, start.elapsed());

    Ok((StatusCode::OK, Json(result)))
}
