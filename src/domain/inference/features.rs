//! Feature vector assembly

use super::encoder::CountryCode;

/// Column order of every feature row, shared by training and inference.
///
/// A classifier only sees positions, not names: a row assembled in any other
/// order is scored without error but the prediction is meaningless.
pub const FEATURE_ORDER: [&str; 3] = ["amount", "hour", "country_code"];

/// Number of features per row
pub const FEATURE_COUNT: usize = FEATURE_ORDER.len();

/// Numeric representation of one transaction, valid for a single inference call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    amount: f64,
    hour: i64,
    country_code: CountryCode,
}

impl FeatureVector {
    pub fn new(amount: f64, hour: i64, country_code: CountryCode) -> Self {
        Self {
            amount,
            hour,
            country_code,
        }
    }

    /// Row values laid out in [`FEATURE_ORDER`]
    pub fn as_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.amount,
            self.hour as f64,
            f64::from(self.country_code.value()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_constant() {
        assert_eq!(FEATURE_ORDER, ["amount", "hour", "country_code"]);
        assert_eq!(FEATURE_COUNT, 3);
    }

    #[test]
    fn test_as_row_follows_feature_order() {
        let features = FeatureVector::new(50000.0, 2, CountryCode::new(3));
        assert_eq!(features.as_row(), [50000.0, 2.0, 3.0]);
    }
}
