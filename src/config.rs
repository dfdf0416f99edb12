//! Settings management for `minsit.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                            |
//! |-------------|----------------------------------------------------|
//! | `[site]`    | Site metadata (home url)                           |
//! | `[sitemap]` | Feed settings (enabled, include list, exclude list)|
//!
//! A missing config file is not an error: it yields the defaults, which
//! leave the sitemap disabled and the include/exclude lists empty.

use crate::utils::escape::{strip_slashes, strip_tags};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

// ============================================================================
// Root configuration
// ============================================================================

/// Root configuration structure representing minsit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata
    pub site: SiteSection,

    /// Sitemap feed settings
    pub sitemap: SitemapSettings,
}

/// `[site]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Absolute site URL used as the home/base reference.
    pub url: String,
}

/// `[sitemap]` section: the operator-facing feed settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapSettings {
    /// Enable sitemap generation.
    pub enabled: bool,

    /// Newline-separated list of literal URLs to add verbatim
    /// (no modification date).
    pub include: String,

    /// Newline-separated list of case-insensitive regex patterns;
    /// matching URLs are excluded from the feed.
    pub pattern: String,
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// A missing file yields [`Config::default`] (sitemap disabled). A file
    /// that exists but cannot be read or parsed fails loudly, as does an
    /// enabled sitemap without a site URL to resolve the home reference
    /// against.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let config: Self = toml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sitemap.enabled && self.site.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.url is required when sitemap.enabled is set".to_owned(),
            ));
        }
        Ok(())
    }
}

impl SitemapSettings {
    /// Non-empty trimmed lines of the include list.
    pub fn include_urls(&self) -> impl Iterator<Item = &str> {
        non_empty_lines(&self.include)
    }

    /// Non-empty trimmed lines of the exclusion pattern list.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        non_empty_lines(&self.pattern)
    }
}

fn non_empty_lines(s: &str) -> impl Iterator<Item = &str> {
    s.lines().map(str::trim).filter(|line| !line.is_empty())
}

// ============================================================================
// Admin input sanitization
// ============================================================================

/// Sanitize raw settings values arriving from an admin boundary before they
/// are persisted.
///
/// Every string value has its tags stripped and backslash escapes undone;
/// the `enabled` field is coerced to a strict 0/1 integer.
pub fn sanitize_settings(
    mut input: serde_json::Map<String, Value>,
) -> serde_json::Map<String, Value> {
    for value in input.values_mut() {
        if let Value::String(s) = value {
            let cleaned = strip_slashes(&strip_tags(s)).into_owned();
            *value = Value::String(cleaned);
        }
    }

    if let Some(value) = input.get_mut("enabled") {
        let on = match &*value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
            Value::String(s) => !s.is_empty() && s != "0",
            _ => false,
        };
        *value = Value::from(i64::from(on));
    }

    input
}

// ============================================================================
// Tests
// ============================================================================
