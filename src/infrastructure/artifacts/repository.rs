//! Filesystem storage for model artifacts

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::config::ArtifactsConfig;
use crate::domain::{CountryEncoder, DomainError, InferencePipeline, FEATURE_ORDER};
use crate::infrastructure::forest::RandomForest;

/// Classifier and encoder produced by one training run
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifacts {
    pub encoder: CountryEncoder,
    pub forest: RandomForest,
}

impl ModelArtifacts {
    /// Wrap the artifacts in a read-only pipeline
    pub fn into_pipeline(self) -> InferencePipeline {
        InferencePipeline::new(Arc::new(self.encoder), Arc::new(self.forest))
    }
}

/// Storage for the artifact pair
pub trait ArtifactStore: Send + Sync {
    fn save(&self, artifacts: &ModelArtifacts) -> Result<(), DomainError>;

    fn load(&self) -> Result<ModelArtifacts, DomainError>;
}

/// Stores artifacts as JSON files in a single directory
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    dir: PathBuf,
    model_file: String,
    encoder_file: String,
}

impl FsArtifactStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        model_file: impl Into<String>,
        encoder_file: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            model_file: model_file.into(),
            encoder_file: encoder_file.into(),
        }
    }

    pub fn from_config(config: &ArtifactsConfig) -> Self {
        Self::new(&config.dir, &config.model_file, &config.encoder_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model_file)
    }

    pub fn encoder_path(&self) -> PathBuf {
        self.dir.join(&self.encoder_file)
    }

    pub fn load_encoder(&self) -> Result<CountryEncoder, DomainError> {
        read_json(&self.encoder_path())
    }

    /// Load the forest and verify it was trained on the inference column order
    pub fn load_forest(&self) -> Result<RandomForest, DomainError> {
        let forest: RandomForest = read_json(&self.model_path())?;
        forest.ensure_feature_order(&FEATURE_ORDER)?;
        Ok(forest)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn save(&self, artifacts: &ModelArtifacts) -> Result<(), DomainError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DomainError::artifact(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        write_json(&self.model_path(), &artifacts.forest)?;
        write_json(&self.encoder_path(), &artifacts.encoder)?;

        info!(
            model = %self.model_path().display(),
            encoder = %self.encoder_path().display(),
            "Artifacts saved"
        );

        Ok(())
    }

    fn load(&self) -> Result<ModelArtifacts, DomainError> {
        let forest = self.load_forest()?;
        let encoder = self.load_encoder()?;

        info!(
            trees = forest.tree_count(),
            countries = encoder.len(),
            features = ?forest.feature_names(),
            "Artifacts loaded"
        );

        Ok(ModelArtifacts { encoder, forest })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let bytes = fs::read(path)
        .map_err(|e| DomainError::artifact(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| DomainError::artifact(format!("Failed to parse {}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DomainError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| {
        DomainError::artifact(format!("Failed to serialize {}: {}", path.display(), e))
    })?;

    fs::write(path, bytes)
        .map_err(|e| DomainError::artifact(format!("Failed to write {}: {}", path.display(), e)))
}
