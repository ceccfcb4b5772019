//! Configuration file support for ossatrisk.
//!
//! Provides YAML-based configuration through `ossatrisk.config.yml` files,
//! including data structures, file loading, validation and the ecosystem
//! registry built from the file and the built-in data sources.

use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use crate::application::dto::{DataSource, OutputFormat, SourceLocation};
use crate::catalog::domain::{SortDirection, SortKey, SortPreset};
use crate::catalog::policies::{ScorePolicy, StalenessPolicy};
use crate::catalog::services::PresentationPolicy;
use crate::shared::error::CatalogError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "ossatrisk.config.yml";

/// Ecosystem shown when neither the CLI nor the config names one
pub const DEFAULT_ECOSYSTEM: &str = "php";

const BUILTIN_ECOSYSTEMS: &[(&str, &str, &str, &str)] = &[(
    "php",
    "PHP",
    "https://raw.githubusercontent.com/Huluti/ossatrisk/main/data/php-packages.json",
    "https://packagist.org/packages/{name}",
)];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub ecosystems: Option<BTreeMap<String, EcosystemConfig>>,
    pub default_ecosystem: Option<String>,
    pub format: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub preset: Option<String>,
    pub timeout_secs: Option<u64>,
    pub staleness: Option<StalenessConfig>,
    pub score: Option<ScoreConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// One data source entry under `ecosystems`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EcosystemConfig {
    pub label: Option<String>,
    pub url: String,
    pub package_url_template: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq)]
pub struct StalenessConfig {
    pub aging_after_days: Option<i64>,
    pub stale_after_days: Option<i64>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq)]
pub struct ScoreConfig {
    pub high_above: Option<f64>,
}

impl ConfigFile {
    /// Presentation thresholds, falling back to the defaults per field
    pub fn presentation_policy(&self) -> Result<PresentationPolicy> {
        let staleness = self.staleness.unwrap_or_default();
        let staleness = StalenessPolicy::new(
            staleness
                .aging_after_days
                .unwrap_or(StalenessPolicy::DEFAULT_AGING_AFTER_DAYS),
            staleness
                .stale_after_days
                .unwrap_or(StalenessPolicy::DEFAULT_STALE_AFTER_DAYS),
        )?;
        let score = ScorePolicy::new(
            self.score
                .and_then(|s| s.high_above)
                .unwrap_or(ScorePolicy::DEFAULT_HIGH_ABOVE),
        );
        Ok(PresentationPolicy { staleness, score })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "configuration loaded");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    CatalogError::InvalidConfig {
        message: message.into(),
    }
    .into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ecosystems) = &config.ecosystems {
        for (name, ecosystem) in ecosystems {
            if name.trim().is_empty() {
                return Err(invalid("ecosystem names must not be empty"));
            }
            if ecosystem.url.trim().is_empty() {
                return Err(invalid(format!(
                    "ecosystems.{}.url must not be empty",
                    name
                )));
            }
        }
    }
    if let Some(format) = &config.format {
        OutputFormat::from_str(format).map_err(invalid)?;
    }
    if let Some(sort) = &config.sort {
        SortKey::from_str(sort).map_err(|e| invalid(first_line(&e.to_string())))?;
    }
    if let Some(order) = &config.order {
        SortDirection::from_str(order).map_err(invalid)?;
    }
    if let Some(preset) = &config.preset {
        SortPreset::parse(preset).map_err(|e| invalid(first_line(&e.to_string())))?;
    }
    if config.timeout_secs == Some(0) {
        return Err(invalid("timeout_secs must be greater than zero"));
    }
    if let Some(high_above) = config.score.and_then(|s| s.high_above) {
        if !high_above.is_finite() {
            return Err(invalid("score.high_above must be a finite number"));
        }
    }
    config.presentation_policy()?;
    Ok(())
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Ecosystems - Named data sources available to `--ecosystem` and `tab`
#[derive(Debug, Clone, PartialEq)]
pub struct Ecosystems {
    sources: BTreeMap<String, DataSource>,
}

impl Ecosystems {
    /// The data sources shipped with the binary
    pub fn builtin() -> Self {
        let sources = BUILTIN_ECOSYSTEMS
            .iter()
            .map(|(name, label, url, template)| {
                let source = DataSource::new(*name, *label, SourceLocation::Url(url.to_string()))
                    .with_package_url_template(Some(template.to_string()));
                (name.to_string(), source)
            })
            .collect();
        Self { sources }
    }

    /// Built-ins overlaid with the config's `ecosystems`; same names replace built-ins
    pub fn from_config(config: Option<&ConfigFile>) -> Self {
        let mut ecosystems = Self::builtin();
        let configured = config.and_then(|c| c.ecosystems.as_ref());
        for (name, entry) in configured.into_iter().flatten() {
            let label = entry.label.clone().unwrap_or_else(|| name.clone());
            let source = DataSource::new(name.clone(), label, SourceLocation::parse(&entry.url))
                .with_package_url_template(entry.package_url_template.clone());
            ecosystems.sources.insert(name.clone(), source);
        }
        ecosystems
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// Looks up an ecosystem by name, case-insensitively
    pub fn resolve(&self, name: &str) -> Result<DataSource> {
        let wanted = name.trim().to_lowercase();
        self.sources
            .iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .map(|(_, source)| source.clone())
            .ok_or_else(|| {
                CatalogError::UnknownEcosystem {
                    name: name.to_string(),
                    available: self.names().join(", "),
                }
                .into()
            })
    }
}
