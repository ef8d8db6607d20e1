//! Review snippet providers.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::error::ReviewError;

pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Mock review tiers, from enthusiastic to critical.
const REVIEW_TIERS: [[&str; 5]; 4] = [
    [
        "Excellent product!",
        "Great quality!",
        "Highly recommended!",
        "Perfect fit!",
        "Amazing value!",
    ],
    [
        "Good product",
        "Nice quality",
        "Worth the price",
        "Comfortable fit",
        "Decent value",
    ],
    [
        "Average product",
        "Okay quality",
        "Bit pricey",
        "Fits okay",
        "Fair value",
    ],
    [
        "Could be better",
        "Quality issues",
        "Too expensive",
        "Sizing issues",
        "Not worth it",
    ],
];

/// Supplies short review snippets for a product label.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    fn name(&self) -> &str;

    /// Returns up to a small bounded number of snippets for `label`.
    async fn sample(&self, label: &str) -> Result<Vec<String>, ReviewError>;
}

/// Draws reviews from fixed template tiers.
///
/// Each call picks one tier uniformly at random and samples
/// `sample_size` distinct templates from it. The label is ignored.
pub struct TemplateReviewSource {
    tiers: Vec<Vec<String>>,
    sample_size: usize,
    rng: Mutex<StdRng>,
}

impl TemplateReviewSource {
    #[must_use]
    pub fn new(sample_size: usize) -> Self {
        Self::with_rng(sample_size, StdRng::from_os_rng())
    }

    /// Same as [`TemplateReviewSource::new`] but reproducible.
    #[must_use]
    pub fn seeded(sample_size: usize, seed: u64) -> Self {
        Self::with_rng(sample_size, StdRng::seed_from_u64(seed))
    }

    /// Replaces the built-in tiers.
    #[must_use]
    pub fn with_tiers(mut self, tiers: Vec<Vec<String>>) -> Self {
        self.tiers = tiers;
        self
    }

    fn with_rng(sample_size: usize, rng: StdRng) -> Self {
        Self {
            tiers: REVIEW_TIERS
                .iter()
                .map(|tier| tier.iter().map(ToString::to_string).collect())
                .collect(),
            sample_size,
            rng: Mutex::new(rng),
        }
    }

    fn draw(&self) -> Vec<String> {
        if self.tiers.is_empty() {
            return Vec::new();
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let tier = &self.tiers[rng.random_range(0..self.tiers.len())];
        tier.choose_multiple(&mut *rng, self.sample_size)
            .cloned()
            .collect()
    }
}

impl Default for TemplateReviewSource {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

#[async_trait]
impl ReviewSource for TemplateReviewSource {
    fn name(&self) -> &str {
        "templates"
    }

    async fn sample(&self, _label: &str) -> Result<Vec<String>, ReviewError> {
        Ok(self.draw())
    }
}

/// Returns the same snippets on every call.
#[derive(Debug, Clone)]
pub struct StaticReviewSource {
    reviews: Vec<String>,
}

impl StaticReviewSource {
    pub fn new<I, S>(reviews: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reviews: reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ReviewSource for StaticReviewSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn sample(&self, _label: &str) -> Result<Vec<String>, ReviewError> {
        Ok(self.reviews.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn tier_of(review: &str) -> usize {
        REVIEW_TIERS
            .iter()
            .position(|tier| tier.contains(&review))
            .expect("review comes from a tier")
    }

    #[tokio::test]
    async fn samples_distinct_reviews_from_a_single_tier() {
        let source = TemplateReviewSource::seeded(DEFAULT_SAMPLE_SIZE, 7);
        for _ in 0..50 {
            let reviews = source.sample("mug").await.unwrap();
            assert_eq!(reviews.len(), 3);

            let unique: HashSet<&String> = reviews.iter().collect();
            assert_eq!(unique.len(), 3);

            let tier = tier_of(&reviews[0]);
            assert!(reviews.iter().all(|r| tier_of(r) == tier));
        }
    }

    #[tokio::test]
    async fn same_seed_gives_same_samples() {
        let a = TemplateReviewSource::seeded(3, 42);
        let b = TemplateReviewSource::seeded(3, 42);
        for _ in 0..10 {
            assert_eq!(a.sample("mug").await.unwrap(), b.sample("mug").await.unwrap());
        }
    }

    #[tokio::test]
    async fn sample_size_is_capped_by_tier_size() {
        let source = TemplateReviewSource::seeded(10, 1);
        assert_eq!(source.sample("mug").await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn zero_sample_size_gives_no_reviews() {
        let source = TemplateReviewSource::seeded(0, 1);
        assert!(source.sample("mug").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_tiers_give_no_reviews() {
        let source = TemplateReviewSource::seeded(3, 1).with_tiers(Vec::new());
        assert!(source.sample("mug").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn every_tier_is_eventually_chosen() {
        let source = TemplateReviewSource::seeded(1, 3);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let reviews = source.sample("mug").await.unwrap();
            seen.insert(tier_of(&reviews[0]));
        }
        assert_eq!(seen.len(), REVIEW_TIERS.len());
    }

    #[tokio::test]
    async fn static_source_returns_its_reviews_in_order() {
        let source = StaticReviewSource::new(["b", "a", "c"]);
        assert_eq!(source.sample("mug").await.unwrap(), ["b", "a", "c"]);
    }
}
