//! Train command - fits the country encoder and classifier, then writes both artifacts

use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::infrastructure::artifacts::{ArtifactStore, FsArtifactStore};
use crate::infrastructure::forest::ForestParams;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::training::{synthetic_dataset, ModelProducer};

/// Arguments for the train command
#[derive(Args, Clone, Debug)]
pub struct TrainArgs {
    /// Directory to write the artifacts to (overrides config)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Synthetic transactions generated per class
    #[arg(long, default_value_t = 300)]
    pub samples_per_class: usize,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub trees: usize,

    /// Maximum tree depth
    #[arg(long, default_value_t = 12)]
    pub max_depth: usize,

    /// Seed for data generation and training
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl TrainArgs {
    fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.trees,
            max_depth: self.max_depth,
            seed: self.seed,
            ..ForestParams::default()
        }
    }
}

/// Run the training pipeline
pub async fn run(args: TrainArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    if let Some(dir) = &args.output_dir {
        config.artifacts.dir = dir.clone();
    }

    let dataset = synthetic_dataset(args.samples_per_class, args.seed);
    info!(
        samples = dataset.len(),
        trees = args.trees,
        max_depth = args.max_depth,
        seed = args.seed,
        "Training fraud model"
    );

    let producer = ModelProducer::new(args.forest_params());
    let artifacts = producer.train(&dataset)?;

    let misses = producer
        .smoke_test(&artifacts)
        .iter()
        .filter(|(_, result)| result.is_fraud().is_none())
        .count();
    if misses > 0 {
        warn!(misses, "Reference transactions could not be scored");
    }

    let store = FsArtifactStore::from_config(&config.artifacts);
    store.save(&artifacts)?;

    info!(
        model = %store.model_path().display(),
        encoder = %store.encoder_path().display(),
        "Training complete"
    );

    Ok(())
}
