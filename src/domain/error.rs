use thiserror::Error;

use super::transaction::TransactionValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] TransactionValidationError),

    #[error("Unknown country: {country}")]
    UnknownCountry { country: String },

    #[error("Classifier error: {message}")]
    Classifier { message: String },

    #[error("Artifact error: {message}")]
    Artifact { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Scoring service error: {message}")]
    ScoringService { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn unknown_country(country: impl Into<String>) -> Self {
        Self::UnknownCountry {
            country: country.into(),
        }
    }

    pub fn classifier(message: impl Into<String>) -> Self {
        Self::Classifier {
            message: message.into(),
        }
    }

    pub fn artifact(message: impl Into<String>) -> Self {
        Self::Artifact {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn scoring_service(message: impl Into<String>) -> Self {
        Self::ScoringService {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_country_error() {
        let error = DomainError::unknown_country("Atlantis");
        assert_eq!(error.to_string(), "Unknown country: Atlantis");
    }

    #[test]
    fn test_validation_error() {
        let error: DomainError = TransactionValidationError::MissingField { field: "hour" }.into();
        assert_eq!(
            error.to_string(),
            "Validation error: Field 'hour' is required"
        );
    }

    #[test]
    fn test_classifier_error() {
        let error = DomainError::classifier("expected 3 features, got 2");
        assert_eq!(
            error.to_string(),
            "Classifier error: expected 3 features, got 2"
        );
    }
}
