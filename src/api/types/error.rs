//! HTTP error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, TransactionValidationError};

/// Error body shared by every failing response: `{ "error": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
            },
        }
    }

    /// Request body could not be turned into a transaction
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn message(&self) -> &str {
        &self.body.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<TransactionValidationError> for ApiError {
    fn from(err: TransactionValidationError) -> Self {
        Self::unprocessable(err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if let DomainError::Validation(inner) = err {
            return inner.into();
        }

        let status = match &err {
            DomainError::Validation(_) | DomainError::UnknownCountry { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            DomainError::Artifact { .. } | DomainError::Configuration { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            DomainError::ScoringService { .. } => StatusCode::BAD_GATEWAY,
            DomainError::Classifier { .. } | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self::new(status, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.body.error)
    }
}

impl std::error::Error for ApiError {}
