//! Fraud Scoring API
//!
//! Scores card transactions as fraudulent or legitimate:
//! - Validates `{ amount, country, hour }` requests
//! - Encodes the country against the training vocabulary
//! - Classifies with a random forest loaded from disk at startup
//! - Trains and writes those artifacts from synthetic data

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::artifacts::{ArtifactStore, FsArtifactStore};
use tracing::info;

/// Load both artifacts named by the configuration; fails if either is missing or corrupt
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = FsArtifactStore::from_config(&config.artifacts);
    info!(
        model = %store.model_path().display(),
        encoder = %store.encoder_path().display(),
        "Loading model artifacts"
    );

    let artifacts = store.load()?;

    Ok(AppState::from_artifacts(artifacts))
}
