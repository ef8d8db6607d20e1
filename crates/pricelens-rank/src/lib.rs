//! Offer ranking for pricelens.
//!
//! Offers are standardized on `(price, rating)` and scored by a linear
//! maximum-margin separator that treats the first-discovered offer as the
//! only positive example. Ranking is best-effort: any fitting problem leaves
//! the arrival order untouched.

pub mod error;
pub mod normalize;
pub mod rank;
pub mod svm;

pub use error::RankError;
pub use normalize::{normalize, FeatureMatrix};
pub use rank::{rank, rank_with, try_rank, RankerConfig};
pub use svm::{LinearSvm, SvmParams};
