//! Per-batch standardization of offer features.

use pricelens_core::Offer;

/// Columns of a feature row.
pub const PRICE: usize = 0;
pub const RATING: usize = 1;

/// Standard deviations at or below this fraction of the column's magnitude
/// are treated as zero. Identical values can still leave a rounding residue
/// of a few ULPs after the mean is subtracted.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Standardized `[price, rating]` rows, one per offer, in offer order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    rows: Vec<[f64; 2]>,
}

impl FeatureMatrix {
    #[must_use]
    pub fn rows(&self) -> &[[f64; 2]] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}

/// Builds the standardized feature matrix for a batch of offers.
///
/// Each column is transformed to `(value - mean) / std` using the batch's
/// own mean and population standard deviation. A column whose standard
/// deviation is zero becomes all zeros. An empty batch gives an empty matrix.
#[must_use]
pub fn normalize(offers: &[Offer]) -> FeatureMatrix {
    if offers.is_empty() {
        return FeatureMatrix::default();
    }

    let prices: Vec<f64> = offers.iter().map(Offer::price).collect();
    let ratings: Vec<f64> = offers.iter().map(Offer::rating).collect();

    let prices = standardize(&prices);
    let ratings = standardize(&ratings);

    FeatureMatrix {
        rows: prices
            .into_iter()
            .zip(ratings)
            .map(|(price, rating)| [price, rating])
            .collect(),
    }
}

fn standardize(values: &[f64]) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    if !std.is_finite() || std <= ZERO_VARIANCE_TOLERANCE * mean.abs().max(1.0) {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - mean) / std).collect()
}
