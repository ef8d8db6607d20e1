//! Sentiment summary for one product.

use pricelens_core::SentimentSummary;

use crate::reviews::ReviewSource;
use crate::scorer::SentimentAnalyzer;

/// One scored snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSample {
    pub text: String,
    /// Compound score in `[-1.0, 1.0]`.
    pub score: f64,
}

/// Samples reviews for `label` and summarizes their sentiment.
///
/// A failing review source is logged and treated as an empty sample, so this
/// never fails. An empty sample yields [`SentimentSummary::neutral`].
pub async fn summarize(
    label: &str,
    source: &dyn ReviewSource,
    analyzer: &SentimentAnalyzer,
) -> SentimentSummary {
    let reviews = match source.sample(label).await {
        Ok(reviews) => reviews,
        Err(e) => {
            tracing::warn!(source = source.name(), label, error = %e, "review source failed");
            Vec::new()
        }
    };

    let summary = score_reviews(reviews, analyzer);
    tracing::info!(
        label,
        reviews = summary.reviews.len(),
        score = summary.score,
        "summarized sentiment"
    );
    summary
}

/// Scores each review and returns the mean along with the reviews in order.
#[must_use]
pub fn score_reviews(reviews: Vec<String>, analyzer: &SentimentAnalyzer) -> SentimentSummary {
    if reviews.is_empty() {
        return SentimentSummary::neutral();
    }

    let samples: Vec<SentimentSample> = reviews
        .into_iter()
        .map(|text| SentimentSample {
            score: analyzer.compound(&text),
            text,
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let denom = samples.len() as f64;
    let score = samples.iter().map(|s| s.score).sum::<f64>() / denom;

    SentimentSummary {
        score: score.clamp(-1.0, 1.0),
        reviews: samples.into_iter().map(|s| s.text).collect(),
    }
}
