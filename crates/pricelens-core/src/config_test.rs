use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:5000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.classifier_url.is_none());
    assert_eq!(cfg.classifier_timeout_secs, 30);
    assert_eq!(cfg.sources_path.to_str(), Some("./config/sources.yaml"));
    assert_eq!(cfg.source_timeout_secs, 10);
    assert_eq!(cfg.source_max_offers, 3);
    assert_eq!(cfg.source_user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.source_max_retries, 0);
    assert_eq!(cfg.source_retry_backoff_base_secs, 1);
    assert!(cfg.lexicon_path.is_none());
    assert_eq!(cfg.review_sample_size, 3);
    assert!((cfg.ranker_c - 1.0).abs() < f64::EPSILON);
    assert_eq!(cfg.max_upload_bytes, 16 * 1024 * 1024);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_ENV", "production");
    map.insert("PRICELENS_CLASSIFIER_URL", "http://models.internal:8080/predict");
    map.insert("PRICELENS_SOURCE_TIMEOUT_SECS", "4");
    map.insert("PRICELENS_SOURCE_MAX_OFFERS", "5");
    map.insert("PRICELENS_LEXICON_PATH", "/opt/lexicon/vader_lexicon.txt");
    map.insert("PRICELENS_RANKER_C", "0.5");

    let cfg = build_app_config(lookup_from_map(&map)).expect("overrides are valid");

    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(
        cfg.classifier_url.as_deref(),
        Some("http://models.internal:8080/predict")
    );
    assert_eq!(cfg.source_timeout_secs, 4);
    assert_eq!(cfg.source_max_offers, 5);
    assert!(cfg.lexicon_path.is_some());
    assert!((cfg.ranker_c - 0.5).abs() < f64::EPSILON);
}

#[test]
fn blank_classifier_url_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_CLASSIFIER_URL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.classifier_url.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_BIND_ADDR"),
        "expected InvalidEnvVar(PRICELENS_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_source_timeout() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_SOURCE_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_SOURCE_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PRICELENS_SOURCE_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_max_offers() {
    let mut map = HashMap::new();
    map.insert("PRICELENS_SOURCE_MAX_OFFERS", "three");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_SOURCE_MAX_OFFERS"),
        "expected InvalidEnvVar(PRICELENS_SOURCE_MAX_OFFERS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_positive_ranker_c() {
    for raw in ["0", "-1.5", "NaN", "inf"] {
        let mut map = HashMap::new();
        map.insert("PRICELENS_RANKER_C", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICELENS_RANKER_C"),
            "expected InvalidEnvVar(PRICELENS_RANKER_C) for {raw}, got: {result:?}"
        );
    }
}
