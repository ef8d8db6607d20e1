use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Model-serving endpoint for the image classifier. The server refuses
    /// to start without one; the CLI can bypass it with `--label`.
    pub classifier_url: Option<String>,
    pub classifier_timeout_secs: u64,
    pub sources_path: PathBuf,
    pub source_timeout_secs: u64,
    pub source_max_offers: usize,
    pub source_user_agent: String,
    pub source_max_retries: u32,
    pub source_retry_backoff_base_secs: u64,
    pub lexicon_path: Option<PathBuf>,
    pub review_sample_size: usize,
    pub ranker_c: f64,
    pub max_upload_bytes: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "classifier_url",
                &self.classifier_url.as_ref().map(|_| "[redacted]"),
            )
            .field("classifier_timeout_secs", &self.classifier_timeout_secs)
            .field("sources_path", &self.sources_path)
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("source_max_offers", &self.source_max_offers)
            .field("source_user_agent", &self.source_user_agent)
            .field("source_max_retries", &self.source_max_retries)
            .field(
                "source_retry_backoff_base_secs",
                &self.source_retry_backoff_base_secs,
            )
            .field("lexicon_path", &self.lexicon_path)
            .field("review_sample_size", &self.review_sample_size)
            .field("ranker_c", &self.ranker_c)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}
