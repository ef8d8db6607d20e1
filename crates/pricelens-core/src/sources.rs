//! Offer source registry, loaded from `config/sources.yaml`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::offer::MAX_RATING;
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Amazon,
    Synthetic,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Amazon => write!(f, "amazon"),
            SourceKind::Synthetic => write!(f, "synthetic"),
        }
    }
}

/// One mock marketplace emitted by a synthetic source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Multiplier range applied to the shared base price.
    pub price_factor: (f64, f64),
    pub rating: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub kind: SourceKind,
    /// Search origin for network sources. Defaults per kind when omitted.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Overrides `PRICELENS_SOURCE_TIMEOUT_SECS` for this source.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Overrides `PRICELENS_SOURCE_MAX_OFFERS` for this source.
    #[serde(default)]
    pub max_offers: Option<usize>,
    #[serde(default)]
    pub base_price: Option<(f64, f64)>,
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl Default for SourcesFile {
    /// Amazon search followed by the Flipkart/Myntra synthetic marketplaces.
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig {
                    name: "amazon".to_string(),
                    kind: SourceKind::Amazon,
                    base_url: None,
                    timeout_secs: None,
                    max_offers: None,
                    base_price: None,
                    sites: Vec::new(),
                },
                SourceConfig {
                    name: "marketplaces".to_string(),
                    kind: SourceKind::Synthetic,
                    base_url: None,
                    timeout_secs: None,
                    max_offers: None,
                    base_price: Some((25.0, 45.0)),
                    sites: vec![
                        SiteConfig {
                            name: "Flipkart".to_string(),
                            price_factor: (0.9, 1.1),
                            rating: (3.8, 4.8),
                        },
                        SiteConfig {
                            name: "Myntra".to_string(),
                            price_factor: (0.95, 1.15),
                            rating: (3.9, 4.9),
                        },
                    ],
                },
            ],
        }
    }
}

/// Load and validate the source registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sources(&content)
}

/// Parse and validate a source registry from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(yaml: &str) -> Result<SourcesFile, ConfigError> {
    let file: SourcesFile = serde_yaml::from_str(yaml)?;
    validate_sources(&file)?;
    Ok(file)
}

fn validate_sources(file: &SourcesFile) -> Result<(), ConfigError> {
    if file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one offer source must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    for source in &file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }
        if !seen_names.insert(source.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }
        if source.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has timeout_secs 0; must be greater than zero",
                source.name
            )));
        }

        if source.kind == SourceKind::Synthetic {
            validate_synthetic(source)?;
        }
    }

    Ok(())
}

fn validate_synthetic(source: &SourceConfig) -> Result<(), ConfigError> {
    if source.sites.is_empty() {
        return Err(ConfigError::Validation(format!(
            "synthetic source '{}' must list at least one site",
            source.name
        )));
    }

    if let Some(range) = source.base_price {
        check_range(&source.name, "base_price", range, is_positive_range)?;
    }

    for site in &source.sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "synthetic source '{}' has a site with an empty name",
                source.name
            )));
        }
        check_range(
            &source.name,
            &format!("sites.{}.price_factor", site.name),
            site.price_factor,
            is_positive_range,
        )?;
        check_range(
            &source.name,
            &format!("sites.{}.rating", site.name),
            site.rating,
            is_rating_range,
        )?;
    }

    Ok(())
}

fn is_positive_range(lo: f64, hi: f64) -> bool {
    lo > 0.0 && hi.is_finite()
}

fn is_rating_range(lo: f64, hi: f64) -> bool {
    lo >= 0.0 && hi <= MAX_RATING
}

fn check_range(
    source: &str,
    field: &str,
    (lo, hi): (f64, f64),
    in_bounds: fn(f64, f64) -> bool,
) -> Result<(), ConfigError> {
    if lo.is_nan() || hi.is_nan() || lo > hi || !in_bounds(lo, hi) {
        return Err(ConfigError::Validation(format!(
            "source '{source}' has invalid {field} range [{lo}, {hi}]"
        )));
    }
    Ok(())
}
