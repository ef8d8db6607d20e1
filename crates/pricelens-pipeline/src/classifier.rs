//! Image classifier boundary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ClassifierError;
use crate::image::ProductImage;

/// Maps a product photo to a textual label.
///
/// Implementations return their best guess even at low confidence; an error
/// means no usable label exists.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// # Errors
    ///
    /// Any failure that leaves the image without a label.
    async fn classify(&self, image: &ProductImage) -> Result<String, ClassifierError>;
}

/// One entry of a model server's prediction list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// Client for an image-classification model server.
///
/// POSTs the raw image bytes to the endpoint, which owns resizing and
/// model-specific normalization, and expects a JSON list of
/// `{"label", "score"}` predictions. The highest-scoring label wins.
pub struct HttpClassifier {
    client: Client,
    url: String,
}

impl HttpClassifier {
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidEndpoint`] if `url` does not parse,
    /// or [`ClassifierError::Http`] if the HTTP client cannot be constructed.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ClassifierError> {
        reqwest::Url::parse(url).map_err(|e| ClassifierError::InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, image: &ProductImage) -> Result<String, ClassifierError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.bytes().to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let predictions: Vec<Prediction> = response.json().await?;
        let top = top_label(predictions)?;

        tracing::debug!(
            filename = image.filename(),
            label = %top.label,
            score = top.score,
            "classified image"
        );
        Ok(top.label)
    }
}

fn top_label(predictions: Vec<Prediction>) -> Result<Prediction, ClassifierError> {
    let mut top = predictions
        .into_iter()
        .reduce(|best, p| if p.score > best.score { p } else { best })
        .ok_or(ClassifierError::NoPredictions)?;

    let trimmed = top.label.trim();
    if trimmed.is_empty() {
        return Err(ClassifierError::EmptyLabel);
    }
    if trimmed.len() != top.label.len() {
        top.label = trimmed.to_string();
    }
    Ok(top)
}

/// Always returns the same label.
#[derive(Debug, Clone)]
pub struct FixedLabelClassifier {
    label: String,
}

impl FixedLabelClassifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl Classifier for FixedLabelClassifier {
    async fn classify(&self, _image: &ProductImage) -> Result<String, ClassifierError> {
        Ok(self.label.clone())
    }
}
