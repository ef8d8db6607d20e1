//! A single marketplace observation for a product.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Highest rating any source may report.
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OfferError {
    #[error("offer source name must be non-empty")]
    EmptySource,

    #[error("offer price must be a positive finite number, got {0}")]
    InvalidPrice(f64),

    #[error("offer rating must be within 0.0..=5.0, got {0}")]
    InvalidRating(f64),
}

/// One source's price and rating for a product.
///
/// Only constructible through [`Offer::new`] (or deserialization, which runs
/// the same checks), so every value in circulation satisfies `price > 0` and
/// `0 <= rating <= 5`. Serialized as `{site, price, rating}` with the price
/// rounded to two decimals; the in-memory value is never rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOffer")]
pub struct Offer {
    #[serde(rename = "site")]
    source: String,
    #[serde(serialize_with = "serialize_price")]
    price: f64,
    rating: f64,
}

#[derive(Deserialize)]
struct RawOffer {
    site: String,
    price: f64,
    rating: f64,
}

impl TryFrom<RawOffer> for Offer {
    type Error = OfferError;

    fn try_from(raw: RawOffer) -> Result<Self, Self::Error> {
        Offer::new(raw.site, raw.price, raw.rating)
    }
}

impl Offer {
    /// Validates and builds an offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError`] when the source is blank, the price is not a
    /// positive finite number, or the rating falls outside `0.0..=5.0`.
    pub fn new(source: impl Into<String>, price: f64, rating: f64) -> Result<Self, OfferError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(OfferError::EmptySource);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(OfferError::InvalidPrice(price));
        }
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(OfferError::InvalidRating(rating));
        }
        Ok(Self {
            source,
            price,
            rating,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }
}

fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((price * 100.0).round() / 100.0)
}
