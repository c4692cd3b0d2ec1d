//! Application state shared by the HTTP handlers

use std::sync::Arc;

use serde::Serialize;

use crate::domain::InferencePipeline;
use crate::infrastructure::artifacts::ModelArtifacts;

/// Facts about the loaded artifacts, reported by `/ready`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub vocabulary_size: usize,
    pub tree_count: usize,
    pub feature_order: Vec<String>,
}

impl ModelInfo {
    pub fn from_artifacts(artifacts: &ModelArtifacts) -> Self {
        Self {
            vocabulary_size: artifacts.encoder.len(),
            tree_count: artifacts.forest.tree_count(),
            feature_order: artifacts.forest.feature_names().to_vec(),
        }
    }
}

/// Application state; artifacts are loaded before it exists and never change
#[derive(Clone, Debug)]
pub struct AppState {
    pub pipeline: Arc<InferencePipeline>,
    pub model: Arc<ModelInfo>,
}

impl AppState {
    pub fn new(pipeline: InferencePipeline, model: ModelInfo) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            model: Arc::new(model),
        }
    }

    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        let model = ModelInfo::from_artifacts(&artifacts);
        Self::new(artifacts.into_pipeline(), model)
    }
}
