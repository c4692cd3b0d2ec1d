//! Synthetic labeled transactions for training

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{FraudLabel, TransactionRequest};

/// Countries legitimate transactions originate from
pub const LOW_RISK_COUNTRIES: [&str; 5] =
    ["United States", "Canada", "United Kingdom", "Germany", "France"];

/// Countries fraudulent transactions originate from
pub const HIGH_RISK_COUNTRIES: [&str; 5] = ["Nigeria", "Russia", "Iran", "Syria", "North Korea"];

const NIGHT_HOURS: [i64; 8] = [0, 1, 2, 3, 4, 5, 22, 23];

/// One training example
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTransaction {
    pub transaction: TransactionRequest,
    pub label: FraudLabel,
}

impl LabeledTransaction {
    pub fn new(transaction: TransactionRequest, label: FraudLabel) -> Self {
        Self { transaction, label }
    }
}

/// Balanced dataset: `per_class` legitimate rows (daytime, 10-5000, low-risk
/// country) followed by `per_class` fraudulent rows (night, 10000-100000,
/// high-risk country)
pub fn synthetic_dataset(per_class: usize, seed: u64) -> Vec<LabeledTransaction> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(per_class * 2);

    for _ in 0..per_class {
        let transaction = TransactionRequest::new(
            rng.gen_range(10.0..5000.0),
            pick(&mut rng, &LOW_RISK_COUNTRIES),
            rng.gen_range(6..22),
        );
        samples.push(LabeledTransaction::new(transaction, FraudLabel::Legitimate));
    }

    for _ in 0..per_class {
        let transaction = TransactionRequest::new(
            rng.gen_range(10000.0..100000.0),
            pick(&mut rng, &HIGH_RISK_COUNTRIES),
            NIGHT_HOURS[rng.gen_range(0..NIGHT_HOURS.len())],
        );
        samples.push(LabeledTransaction::new(transaction, FraudLabel::Fraudulent));
    }

    samples
}

fn pick<'a>(rng: &mut StdRng, choices: &[&'a str]) -> &'a str {
    choices[rng.gen_range(0..choices.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_is_balanced() {
        let samples = synthetic_dataset(50, 7);
        let fraud = samples.iter().filter(|s| s.label.is_fraud()).count();

        assert_eq!(samples.len(), 100);
        assert_eq!(fraud, 50);
    }

    #[test]
    fn test_class_profiles() {
        for sample in synthetic_dataset(100, 1) {
            let t = &sample.transaction;
            match sample.label {
                FraudLabel::Legitimate => {
                    assert!((10.0..5000.0).contains(&t.amount));
                    assert!((6..=21).contains(&t.hour));
                    assert!(LOW_RISK_COUNTRIES.contains(&t.country.as_str()));
                }
                FraudLabel::Fraudulent => {
                    assert!((10000.0..100000.0).contains(&t.amount));
                    assert!(NIGHT_HOURS.contains(&t.hour));
                    assert!(HIGH_RISK_COUNTRIES.contains(&t.country.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(synthetic_dataset(10, 42), synthetic_dataset(10, 42));
        assert_ne!(synthetic_dataset(10, 42), synthetic_dataset(10, 43));
    }
}
