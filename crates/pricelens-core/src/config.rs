use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PRICELENS_ENV", "development"));
    let bind_addr = parse_addr("PRICELENS_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("PRICELENS_LOG_LEVEL", "info");

    let classifier_url = lookup("PRICELENS_CLASSIFIER_URL")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let classifier_timeout_secs = parse_u64("PRICELENS_CLASSIFIER_TIMEOUT_SECS", "30")?;

    let sources_path = PathBuf::from(or_default(
        "PRICELENS_SOURCES_PATH",
        "./config/sources.yaml",
    ));
    let source_timeout_secs = parse_u64("PRICELENS_SOURCE_TIMEOUT_SECS", "10")?;
    if source_timeout_secs == 0 {
        return Err(invalid(
            "PRICELENS_SOURCE_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let source_max_offers = parse_usize("PRICELENS_SOURCE_MAX_OFFERS", "3")?;
    let source_user_agent = or_default("PRICELENS_USER_AGENT", DEFAULT_USER_AGENT);
    let source_max_retries = parse_u32("PRICELENS_SOURCE_MAX_RETRIES", "0")?;
    let source_retry_backoff_base_secs =
        parse_u64("PRICELENS_SOURCE_RETRY_BACKOFF_BASE_SECS", "1")?;

    let lexicon_path = lookup("PRICELENS_LEXICON_PATH").ok().map(PathBuf::from);
    let review_sample_size = parse_usize("PRICELENS_REVIEW_SAMPLE_SIZE", "3")?;

    let raw_c = or_default("PRICELENS_RANKER_C", "1.0");
    let ranker_c = raw_c
        .parse::<f64>()
        .map_err(|e| invalid("PRICELENS_RANKER_C", e.to_string()))?;
    if !ranker_c.is_finite() || ranker_c <= 0.0 {
        return Err(invalid(
            "PRICELENS_RANKER_C",
            format!("must be a positive finite number, got {raw_c}"),
        ));
    }

    let max_upload_bytes = parse_usize("PRICELENS_MAX_UPLOAD_BYTES", "16777216")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        classifier_url,
        classifier_timeout_secs,
        sources_path,
        source_timeout_secs,
        source_max_offers,
        source_user_agent,
        source_max_retries,
        source_retry_backoff_base_secs,
        lexicon_path,
        review_sample_size,
        ranker_c,
        max_upload_bytes,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
