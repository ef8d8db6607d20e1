use pricelens_core::OfferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {source_name} (retry after {retry_after_secs}s)")]
    RateLimited {
        source_name: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid offer from {source_name}: {source}")]
    InvalidOffer {
        source_name: String,
        #[source]
        source: OfferError,
    },

    #[error("source {source_name} timed out after {timeout_ms}ms")]
    Timeout { source_name: String, timeout_ms: u128 },

    #[error("source {source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
}
