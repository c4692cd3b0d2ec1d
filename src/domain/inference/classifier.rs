use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A trained model that labels one feature row.
///
/// Rows are laid out in [`FEATURE_ORDER`](super::FEATURE_ORDER). Implementations
/// must be read-only after construction so one instance can serve concurrent
/// requests.
#[cfg_attr(test, automock)]
pub trait Classifier: Send + Sync {
    /// Predict the label for a single row (0 = legitimate, 1 = fraudulent)
    fn predict(&self, row: &[f64]) -> Result<i64, DomainError>;

    /// Number of features the model was trained on
    fn feature_count(&self) -> usize;
}
