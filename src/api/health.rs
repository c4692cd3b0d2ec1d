//! Health, liveness and readiness endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::{InferenceResult, TransactionRequest, FEATURE_ORDER};

use super::state::{AppState, ModelInfo};

/// Health response; readiness adds component checks and model metadata
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelInfo>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthCheck {
    fn healthy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            message: None,
        }
    }

    fn unhealthy(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
        }
    }
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        model: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check: artifacts are consistent and the pipeline answers
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks = vec![check_feature_order(&state.model), check_pipeline(&state)];

    let overall_status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        model: Some(state.model.as_ref().clone()),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the service is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn check_feature_order(model: &ModelInfo) -> HealthCheck {
    if model.feature_order.iter().map(String::as_str).eq(FEATURE_ORDER) {
        HealthCheck::healthy("feature_order")
    } else {
        HealthCheck::unhealthy(
            "feature_order",
            format!("model features {:?} differ from {:?}", model.feature_order, FEATURE_ORDER),
        )
    }
}

/// Score one known country end to end
fn check_pipeline(state: &AppState) -> HealthCheck {
    let Some(country) = state.pipeline.encoder().classes().first() else {
        return HealthCheck::unhealthy("pipeline", "country vocabulary is empty");
    };

    match state.pipeline.predict(&TransactionRequest::new(1.0, country.clone(), 12)) {
        InferenceResult::Scored { .. } => HealthCheck::healthy("pipeline"),
        InferenceResult::Failed { error } => HealthCheck::unhealthy("pipeline", error),
    }
}
