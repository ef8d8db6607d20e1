mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricelens-cli")]
#[command(about = "Product photo price comparison and review sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline on a product photo and print the result as JSON
    Analyze {
        /// Path to a png, jpg, jpeg or gif image
        image: PathBuf,

        /// Skip the classifier and use this product label
        #[arg(long)]
        label: Option<String>,
    },
    /// Aggregate offers for a product label
    Offers {
        label: String,

        /// Print offers in arrival order instead of ranking them
        #[arg(long)]
        no_rank: bool,
    },
    /// Sample and score reviews for a product label
    Sentiment {
        label: String,

        /// Seed the review sampler for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = pricelens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze { image, label } => {
            commands::run_analyze(&config, &image, label.as_deref()).await
        }
        Commands::Offers { label, no_rank } => {
            commands::run_offers(&config, &label, !no_rank).await
        }
        Commands::Sentiment { label, seed } => {
            commands::run_sentiment(&config, &label, seed).await
        }
    }
}
