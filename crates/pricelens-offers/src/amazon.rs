//! Network-backed offer source scraping Amazon search results.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use pricelens_core::Offer;
use reqwest::Client;

use crate::error::SourceError;
use crate::parse::parse_search_results;
use crate::retry::retry_with_backoff;
use crate::source::{OfferSource, DEFAULT_MAX_OFFERS};

pub const DEFAULT_AMAZON_BASE_URL: &str = "https://www.amazon.com";

/// Display name attached to every offer this source produces.
const SITE: &str = "Amazon";

/// Scrapes the first results of an Amazon product search.
///
/// Requests are sent with browser-like headers; HTTP 429 and transport
/// failures are retried with exponential backoff up to `max_retries` times.
pub struct AmazonSource {
    name: String,
    client: Client,
    base_url: String,
    max_items: usize,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl AmazonSource {
    /// Creates a source with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`SourceError::Http`] if the HTTP client cannot be constructed.
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, SourceError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| SourceError::InvalidBaseUrl {
            base_url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            name: name.into(),
            client,
            base_url,
            max_items: DEFAULT_MAX_OFFERS,
            max_retries: 0,
            backoff_base_secs: 1,
        })
    }

    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_secs: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_secs = backoff_base_secs;
        self
    }

    /// Builds the search URL for a label: `{base}/s?k={label}` with spaces
    /// encoded as `+`.
    #[must_use]
    pub fn search_url(&self, label: &str) -> String {
        let query = label
            .split_whitespace()
            .map(|word| utf8_percent_encode(word, NON_ALPHANUMERIC).to_string())
            .collect::<Vec<_>>()
            .join("+");
        format!("{}/s?k={query}", self.base_url)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, SourceError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                )
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(SourceError::RateLimited {
                    source_name: self.name.clone(),
                    retry_after_secs,
                });
            }

            if !status.is_success() {
                return Err(SourceError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}

#[async_trait]
impl OfferSource for AmazonSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, label: &str) -> Result<Vec<Offer>, SourceError> {
        let url = self.search_url(label);
        let body = self.fetch_page(&url).await?;
        Ok(parse_search_results(&body, SITE, self.max_items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> AmazonSource {
        AmazonSource::new("amazon", base, Duration::from_secs(5), "pricelens-test/0.1")
            .expect("valid source")
    }

    #[test]
    fn search_url_joins_words_with_plus() {
        let s = source("https://www.amazon.com/");
        assert_eq!(
            s.search_url("running shoe"),
            "https://www.amazon.com/s?k=running+shoe"
        );
    }

    #[test]
    fn search_url_percent_encodes_reserved_characters() {
        let s = source("https://www.amazon.com");
        assert_eq!(
            s.search_url("running_shoe & co"),
            "https://www.amazon.com/s?k=running%5Fshoe+%26+co"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = AmazonSource::new("amazon", "not a url", Duration::from_secs(5), "ua");
        assert!(matches!(result, Err(SourceError::InvalidBaseUrl { .. })));
    }
}
