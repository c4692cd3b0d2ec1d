//! Model artifacts: the trained classifier and country encoder pair

mod repository;

pub use repository::{ArtifactStore, FsArtifactStore, ModelArtifacts};
