//! Command handlers for the CLI.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use pricelens_core::AppConfig;
use pricelens_offers::{aggregate, build_adapters, SourceSettings};
use pricelens_pipeline::{
    load_registry, FixedLabelClassifier, Pipeline, PipelineResources, ProductImage,
};
use pricelens_rank::{rank_with, RankerConfig};
use pricelens_sentiment::{summarize, Lexicon, SentimentAnalyzer, TemplateReviewSource};

/// Runs the whole pipeline on an image file and prints the JSON payload.
///
/// With `label` set the classifier is bypassed, so no model server is needed.
///
/// # Errors
///
/// Returns an error if the image cannot be read or is rejected, resources
/// cannot be built, or the pipeline fails fatally.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    path: &Path,
    label: Option<&str>,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let image = ProductImage::new(filename, bytes, config.max_upload_bytes)?;

    let resources = match label {
        Some(label) => {
            PipelineResources::with_classifier(config, Arc::new(FixedLabelClassifier::new(label)))?
        }
        None => PipelineResources::from_app_config(config)?,
    };
    let result = Pipeline::new(Arc::new(resources)).run(&image).await?;
    tracing::info!(
        image = %path.display(),
        product = %result.product,
        offers = result.prices.len(),
        "analysis complete"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Aggregates offers for `label` from every configured source and prints
/// them as JSON, ranked unless `ranked` is false.
///
/// # Errors
///
/// Returns an error if the source registry is invalid or an adapter cannot
/// be built.
pub(crate) async fn run_offers(config: &AppConfig, label: &str, ranked: bool) -> anyhow::Result<()> {
    let sources = load_registry(&config.sources_path)?;
    let adapters = build_adapters(&sources, &SourceSettings::from_app_config(config))?;

    let mut offers = aggregate(label, &adapters).await;
    if ranked {
        offers = rank_with(offers, &RankerConfig::with_c(config.ranker_c));
    }
    tracing::info!(label, ranked, count = offers.len(), "offers collected");

    println!("{}", serde_json::to_string_pretty(&offers)?);
    Ok(())
}

/// Samples template reviews for `label`, scores them and prints the summary.
///
/// # Errors
///
/// Returns an error if the configured lexicon cannot be loaded.
pub(crate) async fn run_sentiment(
    config: &AppConfig,
    label: &str,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::from_path(path)?,
        None => Lexicon::builtin(),
    };
    let analyzer = SentimentAnalyzer::new(Arc::new(lexicon));
    let reviews = match seed {
        Some(seed) => TemplateReviewSource::seeded(config.review_sample_size, seed),
        None => TemplateReviewSource::new(config.review_sample_size),
    };

    let summary = summarize(label, &reviews, &analyzer).await;
    tracing::info!(
        label,
        score = summary.score,
        reviews = summary.reviews.len(),
        "sentiment scored"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
