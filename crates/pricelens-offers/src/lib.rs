//! Offer collection for pricelens.
//!
//! Each marketplace is an [`OfferSource`]. Sources are wrapped in a
//! [`SourceAdapter`] that bounds their run time and output size and turns any
//! failure into an empty contribution, so [`aggregate`] can fan out to every
//! configured source without one provider taking the others down.

pub mod aggregate;
pub mod amazon;
pub mod error;
pub mod fixed;
pub mod parse;
pub mod registry;
pub mod source;
pub mod synthetic;

mod retry;

pub use aggregate::aggregate;
pub use amazon::AmazonSource;
pub use error::SourceError;
pub use fixed::FixedSource;
pub use registry::{build_adapters, SourceSettings};
pub use source::{OfferSource, SourceAdapter, SourceOutcome};
pub use synthetic::SyntheticSource;
