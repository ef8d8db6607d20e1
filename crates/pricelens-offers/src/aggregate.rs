//! Fan-out across every configured offer source.

use futures::future::join_all;
use pricelens_core::Offer;

use crate::source::{SourceAdapter, SourceOutcome};

/// Collects offers for `label` from every adapter.
///
/// Adapters run concurrently as separate tasks; the result concatenates their
/// offers in registration order regardless of completion order. A source that
/// fails, times out or panics contributes nothing. With no successful
/// adapter the result is empty. No deduplication is performed.
pub async fn aggregate(label: &str, adapters: &[SourceAdapter]) -> Vec<Offer> {
    let handles: Vec<_> = adapters
        .iter()
        .map(|adapter| {
            let adapter = adapter.clone();
            let label = label.to_owned();
            tokio::spawn(async move { adapter.fetch_outcome(&label).await })
        })
        .collect();

    let results = join_all(handles).await;

    let mut offers = Vec::new();
    let mut unavailable = 0usize;
    for (adapter, joined) in adapters.iter().zip(results) {
        let outcome = joined.unwrap_or_else(|e| {
            tracing::error!(source = adapter.name(), error = %e, "offer source task failed");
            SourceOutcome::Unavailable {
                source: adapter.name().to_string(),
                reason: e.to_string(),
            }
        });
        if outcome.is_unavailable() {
            unavailable += 1;
        }
        offers.extend(outcome.into_offers());
    }

    tracing::info!(
        label,
        sources = adapters.len(),
        unavailable,
        count = offers.len(),
        "aggregated offers"
    );

    offers
}
