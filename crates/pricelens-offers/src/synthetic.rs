//! Mock marketplace offers generated around a shared base price.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use pricelens_core::{Offer, SiteConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SourceError;
use crate::source::OfferSource;

pub const DEFAULT_BASE_PRICE: (f64, f64) = (25.0, 45.0);

/// Generates one offer per configured site on every call.
///
/// A base price is drawn once per call; each site then scales it by a factor
/// from its own range (rounded to cents) and draws a rating from its own
/// range (rounded to one decimal). Sites come out in configuration order.
pub struct SyntheticSource {
    name: String,
    base_price: (f64, f64),
    sites: Vec<SiteConfig>,
    rng: Mutex<StdRng>,
}

impl SyntheticSource {
    pub fn new(name: impl Into<String>, base_price: (f64, f64), sites: Vec<SiteConfig>) -> Self {
        Self::with_rng(name, base_price, sites, StdRng::from_os_rng())
    }

    /// Same as [`SyntheticSource::new`] but reproducible.
    pub fn seeded(
        name: impl Into<String>,
        base_price: (f64, f64),
        sites: Vec<SiteConfig>,
        seed: u64,
    ) -> Self {
        Self::with_rng(name, base_price, sites, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        name: impl Into<String>,
        base_price: (f64, f64),
        sites: Vec<SiteConfig>,
        rng: StdRng,
    ) -> Self {
        Self {
            name: name.into(),
            base_price,
            sites,
            rng: Mutex::new(rng),
        }
    }

    fn generate(&self) -> Result<Vec<Offer>, SourceError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let base = rng.random_range(self.base_price.0..=self.base_price.1);

        self.sites
            .iter()
            .map(|site| {
                let factor = rng.random_range(site.price_factor.0..=site.price_factor.1);
                let price = round_to(base * factor, 2);
                let rating = round_to(rng.random_range(site.rating.0..=site.rating.1), 1);
                Offer::new(site.name.as_str(), price, rating).map_err(|e| {
                    SourceError::InvalidOffer {
                        source_name: self.name.clone(),
                        source: e,
                    }
                })
            })
            .collect()
    }
}

#[async_trait]
impl OfferSource for SyntheticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _label: &str) -> Result<Vec<Offer>, SourceError> {
        self.generate()
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marketplaces() -> Vec<SiteConfig> {
        vec![
            SiteConfig {
                name: "Flipkart".to_string(),
                price_factor: (0.9, 1.1),
                rating: (3.8, 4.8),
            },
            SiteConfig {
                name: "Myntra".to_string(),
                price_factor: (0.95, 1.15),
                rating: (3.9, 4.9),
            },
        ]
    }

    #[tokio::test]
    async fn emits_one_offer_per_site_in_order() {
        let source = SyntheticSource::seeded("marketplaces", DEFAULT_BASE_PRICE, marketplaces(), 7);
        let offers = source.fetch("mug").await.expect("synthetic offers");
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].source(), "Flipkart");
        assert_eq!(offers[1].source(), "Myntra");
    }

    #[tokio::test]
    async fn values_stay_within_configured_ranges() {
        let source = SyntheticSource::seeded("marketplaces", DEFAULT_BASE_PRICE, marketplaces(), 42);
        for _ in 0..200 {
            let offers = source.fetch("mug").await.unwrap();
            let flipkart = &offers[0];
            let myntra = &offers[1];
            assert!((22.5..=49.5).contains(&flipkart.price()), "{flipkart:?}");
            assert!((3.8..=4.8).contains(&flipkart.rating()), "{flipkart:?}");
            assert!((23.75..=51.75).contains(&myntra.price()), "{myntra:?}");
            assert!((3.9..=4.9).contains(&myntra.rating()), "{myntra:?}");
        }
    }

    #[tokio::test]
    async fn values_are_rounded() {
        let source = SyntheticSource::seeded("marketplaces", DEFAULT_BASE_PRICE, marketplaces(), 3);
        let offers = source.fetch("mug").await.unwrap();
        for offer in offers {
            assert!((offer.price() * 100.0 - (offer.price() * 100.0).round()).abs() < 1e-6);
            assert!((offer.rating() * 10.0 - (offer.rating() * 10.0).round()).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn same_seed_reproduces_offers() {
        let a = SyntheticSource::seeded("m", DEFAULT_BASE_PRICE, marketplaces(), 11);
        let b = SyntheticSource::seeded("m", DEFAULT_BASE_PRICE, marketplaces(), 11);
        assert_eq!(a.fetch("x").await.unwrap(), b.fetch("x").await.unwrap());
    }

    #[test]
    fn round_to_rounds_half_away_from_zero() {
        assert!((round_to(4.25, 1) - 4.3).abs() < 1e-9);
        assert!((round_to(31.456, 2) - 31.46).abs() < 1e-9);
    }
}
