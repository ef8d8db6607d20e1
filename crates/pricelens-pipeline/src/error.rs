use pricelens_core::ConfigError;
use pricelens_offers::SourceError;
use pricelens_sentiment::LexiconError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid classifier endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("classifier returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("classifier returned no predictions")]
    NoPredictions,

    #[error("classifier returned an empty label")]
    EmptyLabel,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("No selected file")]
    MissingFilename,

    #[error("Invalid file type")]
    UnsupportedType { filename: String },

    #[error("uploaded image is empty")]
    Empty,

    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

/// A fatal pipeline failure. Everything recoverable is absorbed below this.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure to build the shared pipeline resources at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
