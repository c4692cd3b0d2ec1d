//! HTTP client for upstream services that call the scoring endpoint

mod scoring;

pub use scoring::{FraudScorer, FraudScoringClient};
