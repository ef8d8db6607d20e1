//! End-to-end product analysis for pricelens.
//!
//! Classifies an uploaded product photo, aggregates and ranks offers for the
//! resulting label and attaches a review sentiment summary. Everything the
//! pipeline needs is built once into [`PipelineResources`] and shared
//! read-only between requests.

pub mod classifier;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod resources;

pub use classifier::{Classifier, FixedLabelClassifier, HttpClassifier, Prediction};
pub use error::{ClassifierError, ImageError, PipelineError, SetupError};
pub use image::{check_filename, ProductImage, ALLOWED_EXTENSIONS};
pub use pipeline::Pipeline;
pub use resources::{load_registry, PipelineResources};
