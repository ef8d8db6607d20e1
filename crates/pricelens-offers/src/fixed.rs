//! A source that replays a fixed list of offers.

use async_trait::async_trait;
use pricelens_core::Offer;

use crate::error::SourceError;
use crate::source::OfferSource;

/// Replays prepared offers, or fails every call when built with
/// [`FixedSource::failing`]. Used for CLI replays and as a stand-in for
/// real providers in tests.
#[derive(Debug, Clone)]
pub struct FixedSource {
    name: String,
    result: Result<Vec<Offer>, String>,
}

impl FixedSource {
    pub fn new(name: impl Into<String>, offers: Vec<Offer>) -> Self {
        Self {
            name: name.into(),
            result: Ok(offers),
        }
    }

    pub fn failing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: Err(reason.into()),
        }
    }
}

#[async_trait]
impl OfferSource for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _label: &str) -> Result<Vec<Offer>, SourceError> {
        self.result
            .clone()
            .map_err(|reason| SourceError::Unavailable {
                source_name: self.name.clone(),
                reason,
            })
    }
}
