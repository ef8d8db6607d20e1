//! The offer source contract and its failure-isolating wrapper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pricelens_core::Offer;

use crate::error::SourceError;

/// Wall-clock budget for a single source when none is configured.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-source output cap when none is configured.
pub const DEFAULT_MAX_OFFERS: usize = 3;

/// A provider of raw offers for a product label.
///
/// Implementations may fail freely; [`SourceAdapter`] is responsible for
/// containing those failures.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Stable name used in logs and in the source registry.
    fn name(&self) -> &str;

    /// Fetches offers for `label` in the source's native order.
    ///
    /// # Errors
    ///
    /// Any retrieval or parse failure for this source.
    async fn fetch(&self, label: &str) -> Result<Vec<Offer>, SourceError>;
}

/// What a single source contributed to an aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Offers(Vec<Offer>),
    /// The source failed or timed out and contributes nothing.
    Unavailable { source: String, reason: String },
}

impl SourceOutcome {
    #[must_use]
    pub fn into_offers(self) -> Vec<Offer> {
        match self {
            SourceOutcome::Offers(offers) => offers,
            SourceOutcome::Unavailable { .. } => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SourceOutcome::Unavailable { .. })
    }
}

/// An [`OfferSource`] bounded by a timeout and an output cap.
///
/// `fetch` never fails: errors and timeouts are logged and produce an empty
/// result. Cloning is cheap; the underlying source is shared.
#[derive(Clone)]
pub struct SourceAdapter {
    source: Arc<dyn OfferSource>,
    timeout: Duration,
    max_offers: usize,
}

impl std::fmt::Debug for SourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceAdapter")
            .field("source", &self.source.name())
            .field("timeout", &self.timeout)
            .field("max_offers", &self.max_offers)
            .finish()
    }
}

impl SourceAdapter {
    pub fn new(source: impl OfferSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    #[must_use]
    pub fn from_arc(source: Arc<dyn OfferSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_SOURCE_TIMEOUT,
            max_offers: DEFAULT_MAX_OFFERS,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_offers(mut self, max_offers: usize) -> Self {
        self.max_offers = max_offers;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.source.name()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn max_offers(&self) -> usize {
        self.max_offers
    }

    /// Runs the source under its timeout and cap, reporting what happened.
    pub async fn fetch_outcome(&self, label: &str) -> SourceOutcome {
        let name = self.source.name();
        let result = match tokio::time::timeout(self.timeout, self.source.fetch(label)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                source_name: name.to_string(),
                timeout_ms: self.timeout.as_millis(),
            }),
        };

        match result {
            Ok(mut offers) => {
                if offers.len() > self.max_offers {
                    tracing::debug!(
                        source = name,
                        fetched = offers.len(),
                        kept = self.max_offers,
                        "capping source output"
                    );
                    offers.truncate(self.max_offers);
                }
                tracing::debug!(source = name, count = offers.len(), "collected offers");
                SourceOutcome::Offers(offers)
            }
            Err(e) => {
                tracing::warn!(
                    source = name,
                    label,
                    error = %e,
                    "offer source unavailable"
                );
                SourceOutcome::Unavailable {
                    source: name.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Offers for `label`, or an empty list if the source failed.
    pub async fn fetch(&self, label: &str) -> Vec<Offer> {
        self.fetch_outcome(label).await.into_offers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::FixedSource;

    struct SlowSource;

    #[async_trait]
    impl OfferSource for SlowSource {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch(&self, _label: &str) -> Result<Vec<Offer>, SourceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![Offer::new("Slow", 1.0, 1.0).unwrap()])
        }
    }

    fn offers(n: usize) -> Vec<Offer> {
        (1..=n)
            .map(|i| Offer::new("Shop", 10.0 + i as f64, 4.0).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn caps_output_in_native_order() {
        let adapter = SourceAdapter::new(FixedSource::new("shop", offers(5))).with_max_offers(2);
        let got = adapter.fetch("mug").await;
        assert_eq!(got, offers(2));
    }

    #[tokio::test]
    async fn failure_becomes_unavailable_outcome() {
        let adapter = SourceAdapter::new(FixedSource::failing("broken", "connection refused"));
        let outcome = adapter.fetch_outcome("mug").await;
        assert!(outcome.is_unavailable());
        assert!(adapter.fetch("mug").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_becomes_unavailable_outcome() {
        let adapter = SourceAdapter::new(SlowSource).with_timeout(Duration::from_secs(10));
        let outcome = adapter.fetch_outcome("mug").await;
        match outcome {
            SourceOutcome::Unavailable { source, reason } => {
                assert_eq!(source, "slow");
                assert!(reason.contains("timed out"), "reason: {reason}");
            }
            SourceOutcome::Offers(o) => panic!("expected timeout, got {o:?}"),
        }
    }

    #[tokio::test]
    async fn exact_duplicates_are_preserved() {
        let dup = Offer::new("Shop", 12.5, 4.1).unwrap();
        let adapter = SourceAdapter::new(FixedSource::new("shop", vec![dup.clone(), dup.clone()]));
        assert_eq!(adapter.fetch("mug").await, vec![dup.clone(), dup]);
    }
}
