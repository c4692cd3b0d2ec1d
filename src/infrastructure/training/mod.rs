//! Offline model artifact producer

mod dataset;
mod service;

pub use dataset::{
    synthetic_dataset, LabeledTransaction, HIGH_RISK_COUNTRIES, LOW_RISK_COUNTRIES,
};
pub use service::{ModelProducer, REFERENCE_CASES};
