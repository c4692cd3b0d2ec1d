//! CLI module for the fraud scoring service
//!
//! - `serve`: load the model artifacts and run the HTTP API
//! - `train`: fit the encoder and classifier on synthetic data and write the artifacts

pub mod serve;
pub mod train;

use clap::{Parser, Subcommand};

/// Fraud Scoring API - transaction fraud classification over a pre-trained model
#[derive(Parser)]
#[command(name = "fraud-scoring-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load artifacts and run the scoring API
    Serve,

    /// Train model artifacts on synthetic transactions
    Train(train::TrainArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["fraud-scoring-api", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_train_flags() {
        let cli = Cli::try_parse_from([
            "fraud-scoring-api",
            "train",
            "--output-dir",
            "/tmp/models",
            "--trees",
            "25",
            "--seed",
            "7",
        ])
        .unwrap();

        let Command::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(args.output_dir.as_deref(), Some("/tmp/models"));
        assert_eq!(args.trees, 25);
        assert_eq!(args.seed, 7);
        assert_eq!(args.samples_per_class, 300);
    }
}
