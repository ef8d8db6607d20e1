//! Review sentiment for pricelens.
//!
//! Samples a few short review snippets for a product, scores each with a
//! valence-aware lexicon analyzer and averages the compound scores into a
//! `SentimentSummary`. The lexicon is loaded once and shared read-only.

pub mod error;
pub mod lexicon;
pub mod reviews;
pub mod scorer;
pub mod summary;

pub use error::{LexiconError, ReviewError};
pub use lexicon::Lexicon;
pub use reviews::{ReviewSource, StaticReviewSource, TemplateReviewSource, DEFAULT_SAMPLE_SIZE};
pub use scorer::SentimentAnalyzer;
pub use summary::{score_reviews, summarize, SentimentSample};
