//! Relevance ordering of an aggregated offer set.

use pricelens_core::Offer;

use crate::error::RankError;
use crate::normalize::normalize;
use crate::svm::{LinearSvm, SvmParams};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RankerConfig {
    pub svm: SvmParams,
}

impl RankerConfig {
    /// Default solver settings with the given soft-margin penalty.
    #[must_use]
    pub fn with_c(c: f64) -> Self {
        Self {
            svm: SvmParams {
                c,
                ..SvmParams::default()
            },
        }
    }
}

/// Orders offers by relevance with the default ranker settings.
#[must_use]
pub fn rank(offers: Vec<Offer>) -> Vec<Offer> {
    rank_with(offers, &RankerConfig::default())
}

/// Orders offers by signed distance to the fitted hyperplane, highest first.
///
/// The first offer is the positive anchor of the fit and every later offer is
/// negative. Equal distances come out in reverse arrival order. Fewer than two
/// offers are returned unchanged. If the fit cannot be completed the offers
/// are returned in their original order.
#[must_use]
pub fn rank_with(offers: Vec<Offer>, config: &RankerConfig) -> Vec<Offer> {
    match try_rank(&offers, config) {
        Ok(order) => apply_order(offers, &order),
        Err(e) => {
            tracing::warn!(count = offers.len(), error = %e, "ranking degenerate, keeping arrival order");
            offers
        }
    }
}

/// Computes the ranked order as indices into `offers`.
///
/// # Errors
///
/// Returns [`RankError`] if the classifier cannot be fitted on the batch.
pub fn try_rank(offers: &[Offer], config: &RankerConfig) -> Result<Vec<usize>, RankError> {
    if offers.len() < 2 {
        return Ok((0..offers.len()).collect());
    }

    let features = normalize(offers);
    if !features.is_finite() {
        return Err(RankError::NonFiniteFeatures);
    }

    let positive: Vec<bool> = (0..features.len()).map(|i| i == 0).collect();
    let model = LinearSvm::fit(features.rows(), &positive, &config.svm)?;

    let scores: Vec<f64> = features
        .rows()
        .iter()
        .map(|row| model.signed_distance(row))
        .collect();

    let mut order: Vec<usize> = (0..offers.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    order.reverse();

    tracing::debug!(
        count = offers.len(),
        iterations = model.iterations(),
        weights = ?model.weights(),
        bias = model.bias(),
        "ranked offers"
    );

    Ok(order)
}

fn apply_order(offers: Vec<Offer>, order: &[usize]) -> Vec<Offer> {
    let mut slots: Vec<Option<Offer>> = offers.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}
