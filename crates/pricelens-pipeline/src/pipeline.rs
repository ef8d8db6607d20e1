//! Request-level orchestration.

use std::sync::Arc;

use pricelens_core::{title_case, PipelineResult};
use pricelens_offers::aggregate;
use pricelens_rank::rank_with;
use pricelens_sentiment::summarize;

use crate::error::PipelineError;
use crate::image::ProductImage;
use crate::resources::PipelineResources;

/// Runs classify → aggregate → rank → summarize for one request.
///
/// Cloning is cheap; all clones share the same resources.
#[derive(Debug, Clone)]
pub struct Pipeline {
    resources: Arc<PipelineResources>,
}

impl Pipeline {
    #[must_use]
    pub fn new(resources: Arc<PipelineResources>) -> Self {
        Self { resources }
    }

    #[must_use]
    pub fn resources(&self) -> &PipelineResources {
        &self.resources
    }

    /// Analyzes one product photo.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Classification`] if the image cannot be
    /// labelled, or [`PipelineError::Internal`] if a stage fails
    /// unrecoverably. Source, ranking and sentiment failures are absorbed.
    pub async fn run(&self, image: &ProductImage) -> Result<PipelineResult, PipelineError> {
        let label = self.resources.classifier.classify(image).await?;
        tracing::info!(filename = image.filename(), label = %label, "image classified");
        self.run_for_label(&label).await
    }

    /// Runs every stage after classification for an already known label.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Internal`] if the ranking task is lost.
    pub async fn run_for_label(&self, label: &str) -> Result<PipelineResult, PipelineError> {
        let offers = aggregate(label, &self.resources.adapters).await;

        let ranker = self.resources.ranker;
        let prices = tokio::task::spawn_blocking(move || rank_with(offers, &ranker))
            .await
            .map_err(|e| PipelineError::Internal(format!("ranking task failed: {e}")))?;

        let sentiment = summarize(
            label,
            self.resources.reviews.as_ref(),
            &self.resources.analyzer,
        )
        .await;

        tracing::info!(
            label,
            offers = prices.len(),
            sentiment = sentiment.score,
            "pipeline complete"
        );

        Ok(PipelineResult {
            product: title_case(label),
            prices,
            sentiment,
        })
    }
}
