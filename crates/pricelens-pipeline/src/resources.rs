//! Shared, read-only pipeline dependencies built once at startup.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use pricelens_core::{load_sources, AppConfig, ConfigError, SourcesFile};
use pricelens_offers::{build_adapters, SourceAdapter, SourceSettings};
use pricelens_rank::RankerConfig;
use pricelens_sentiment::{Lexicon, ReviewSource, SentimentAnalyzer, TemplateReviewSource};

use crate::classifier::{Classifier, HttpClassifier};
use crate::error::SetupError;

pub struct PipelineResources {
    pub classifier: Arc<dyn Classifier>,
    /// Offer sources in registration order.
    pub adapters: Vec<SourceAdapter>,
    pub reviews: Arc<dyn ReviewSource>,
    pub analyzer: SentimentAnalyzer,
    pub ranker: RankerConfig,
}

impl PipelineResources {
    /// Builds every resource from configuration, including the HTTP
    /// classifier.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] if no classifier URL is configured, or
    /// any error of [`PipelineResources::with_classifier`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SetupError> {
        let url = config
            .classifier_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("PRICELENS_CLASSIFIER_URL".to_string()))?;
        let classifier = HttpClassifier::new(
            url,
            Duration::from_secs(config.classifier_timeout_secs),
        )?;
        Self::with_classifier(config, Arc::new(classifier))
    }

    /// Builds every resource from configuration around the given classifier.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the source registry or lexicon cannot be
    /// loaded, or an adapter cannot be constructed.
    pub fn with_classifier(
        config: &AppConfig,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, SetupError> {
        let sources = load_registry(&config.sources_path)?;
        let adapters = build_adapters(&sources, &SourceSettings::from_app_config(config))?;

        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::from_path(path)?,
            None => Lexicon::builtin(),
        };

        tracing::info!(
            sources = adapters.len(),
            lexicon_words = lexicon.len(),
            review_sample_size = config.review_sample_size,
            ranker_c = config.ranker_c,
            "pipeline resources ready"
        );

        Ok(Self {
            classifier,
            adapters,
            reviews: Arc::new(TemplateReviewSource::new(config.review_sample_size)),
            analyzer: SentimentAnalyzer::new(Arc::new(lexicon)),
            ranker: RankerConfig::with_c(config.ranker_c),
        })
    }
}

/// Loads the source registry, falling back to the built-in one when `path`
/// does not exist. A present but invalid file is an error.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
pub fn load_registry(path: &Path) -> Result<SourcesFile, ConfigError> {
    if path.exists() {
        return load_sources(path);
    }
    tracing::warn!(
        path = %path.display(),
        "sources file not found, using built-in registry"
    );
    Ok(SourcesFile::default())
}

impl std::fmt::Debug for PipelineResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineResources")
            .field("adapters", &self.adapters)
            .field("reviews", &self.reviews.name())
            .field("lexicon_words", &self.analyzer.lexicon().len())
            .field("ranker", &self.ranker)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pricelens_core::Environment;

    use super::*;
    use crate::classifier::FixedLabelClassifier;

    fn config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            log_level: "info".to_string(),
            classifier_url: None,
            classifier_timeout_secs: 5,
            sources_path: PathBuf::from("/nonexistent/pricelens/sources.yaml"),
            source_timeout_secs: 4,
            source_max_offers: 2,
            source_user_agent: "pricelens-test".to_string(),
            source_max_retries: 0,
            source_retry_backoff_base_secs: 1,
            lexicon_path: None,
            review_sample_size: 3,
            ranker_c: 0.5,
            max_upload_bytes: 1024,
        }
    }

    #[test]
    fn missing_registry_falls_back_to_builtin_sources() {
        let resources =
            PipelineResources::with_classifier(&config(), Arc::new(FixedLabelClassifier::new("x")))
                .expect("resources");
        let names: Vec<&str> = resources.adapters.iter().map(SourceAdapter::name).collect();
        assert_eq!(names, ["amazon", "marketplaces"]);
        assert!(resources
            .adapters
            .iter()
            .all(|a| a.timeout() == Duration::from_secs(4) && a.max_offers() == 2));
        assert!((resources.ranker.svm.c - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn classifier_url_is_required() {
        let err = PipelineResources::from_app_config(&config()).unwrap_err();
        assert!(matches!(
            err,
            SetupError::Config(ConfigError::MissingEnvVar(ref var)) if var == "PRICELENS_CLASSIFIER_URL"
        ));
    }

    #[test]
    fn invalid_classifier_url_is_reported() {
        let mut config = config();
        config.classifier_url = Some("not a url".to_string());
        let err = PipelineResources::from_app_config(&config).unwrap_err();
        assert!(matches!(err, SetupError::Classifier(_)));
    }

    #[test]
    fn unreadable_lexicon_is_reported() {
        let mut config = config();
        config.lexicon_path = Some(PathBuf::from("/nonexistent/pricelens/vader.txt"));
        let err =
            PipelineResources::with_classifier(&config, Arc::new(FixedLabelClassifier::new("x")))
                .unwrap_err();
        assert!(matches!(err, SetupError::Lexicon(_)));
    }
}
