//! Builds the adapter list from the source registry.

use std::time::Duration;

use pricelens_core::{AppConfig, SourceConfig, SourceKind, SourcesFile};

use crate::amazon::{AmazonSource, DEFAULT_AMAZON_BASE_URL};
use crate::error::SourceError;
use crate::source::{SourceAdapter, DEFAULT_MAX_OFFERS, DEFAULT_SOURCE_TIMEOUT};
use crate::synthetic::{SyntheticSource, DEFAULT_BASE_PRICE};

/// Process-wide defaults applied to every source unless the registry
/// overrides them per source.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub timeout: Duration,
    pub max_offers: usize,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SOURCE_TIMEOUT,
            max_offers: DEFAULT_MAX_OFFERS,
            user_agent: format!("pricelens/{}", env!("CARGO_PKG_VERSION")),
            max_retries: 0,
            backoff_base_secs: 1,
        }
    }
}

impl SourceSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.source_timeout_secs),
            max_offers: config.source_max_offers,
            user_agent: config.source_user_agent.clone(),
            max_retries: config.source_max_retries,
            backoff_base_secs: config.source_retry_backoff_base_secs,
        }
    }
}

/// Instantiates one adapter per registry entry, in registry order.
///
/// # Errors
///
/// Returns [`SourceError`] if a network source cannot be constructed
/// (invalid base URL or HTTP client setup failure).
pub fn build_adapters(
    sources: &SourcesFile,
    settings: &SourceSettings,
) -> Result<Vec<SourceAdapter>, SourceError> {
    sources
        .sources
        .iter()
        .map(|config| build_adapter(config, settings))
        .collect()
}

fn build_adapter(
    config: &SourceConfig,
    settings: &SourceSettings,
) -> Result<SourceAdapter, SourceError> {
    let timeout = config
        .timeout_secs
        .map_or(settings.timeout, Duration::from_secs);
    let max_offers = config.max_offers.unwrap_or(settings.max_offers);

    let adapter = match config.kind {
        SourceKind::Amazon => {
            let base_url = config
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_AMAZON_BASE_URL);
            let source =
                AmazonSource::new(config.name.as_str(), base_url, timeout, &settings.user_agent)?
                    .with_max_items(max_offers)
                    .with_retries(settings.max_retries, settings.backoff_base_secs);
            SourceAdapter::new(source)
        }
        SourceKind::Synthetic => SourceAdapter::new(SyntheticSource::new(
            config.name.as_str(),
            config.base_price.unwrap_or(DEFAULT_BASE_PRICE),
            config.sites.clone(),
        )),
    };

    tracing::debug!(
        source = %config.name,
        kind = %config.kind,
        timeout_ms = timeout.as_millis(),
        max_offers,
        "registered offer source"
    );

    Ok(adapter.with_timeout(timeout).with_max_offers(max_offers))
}
