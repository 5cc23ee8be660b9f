//! Gallery configuration.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! layered over the stock defaults, so a config file only needs the keys it
//! wants to change. Unknown keys are rejected.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content = "content.json"           # Path or http(s) URL of the content document
//! categories_include_featured = false # Also list Identified/Rare items in Categories
//!
//! [site]
//! title = "Gallery"
//!
//! [sections]
//! identified_title = "Identified"
//! rare_title = "Rare Series"
//! categories_title = "Categories"
//! empty_grid = "Nothing here yet."
//! empty_categories = "No category items yet."
//!
//! [media]
//! video_extensions = [".mp4", ".webm", ".mov"]
//! visibility_threshold = 0.35
//! ```

use crate::card::MediaPolicy;
use crate::classify::ClassifyOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Where the content document lives: a file path or an `http(s)://` URL.
    pub content: String,
    /// When true, Identified and Rare items are duplicated into Categories.
    pub categories_include_featured: bool,
    pub site: SiteConfig,
    /// Section headings and empty-state messages.
    pub sections: SectionsConfig,
    /// Media classification and lazy-loading settings.
    pub media: MediaConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            content: "content.json".to_string(),
            categories_include_featured: false,
            site: SiteConfig::default(),
            sections: SectionsConfig::default(),
            media: MediaConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.trim().is_empty() {
            return Err(ConfigError::Validation("content must not be empty".into()));
        }
        let threshold = self.media.visibility_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "media.visibility_threshold must be greater than 0 and at most 1".into(),
            ));
        }
        if self.media.video_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "media.video_extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .media
            .video_extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(ConfigError::Validation(format!(
                "media.video_extensions entry {ext:?} must look like \".mp4\""
            )));
        }
        Ok(())
    }

    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            include_featured_in_categories: self.categories_include_featured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document `<title>` and page heading.
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
        }
    }
}

/// Section headings and empty-state messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionsConfig {
    pub identified_title: String,
    pub rare_title: String,
    pub categories_title: String,
    /// Shown in place of an empty card grid.
    pub empty_grid: String,
    /// Shown when Categories has no blocks at all.
    pub empty_categories: String,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            identified_title: "Identified".to_string(),
            rare_title: "Rare Series".to_string(),
            categories_title: "Categories".to_string(),
            empty_grid: "Nothing here yet.".to_string(),
            empty_categories: "No category items yet.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Preview locators ending in one of these (case-insensitive) render as video.
    pub video_extensions: Vec<String>,
    /// Fraction of a video's area that must be on screen before it loads and plays.
    pub visibility_threshold: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            video_extensions: MediaPolicy::default().video_extensions,
            visibility_threshold: 0.35,
        }
    }
}

impl MediaConfig {
    pub fn policy(&self) -> MediaPolicy {
        MediaPolicy {
            video_extensions: self
                .video_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value. `Ok(None)` when the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, layered over the stock defaults.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Preview Gal Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Content document: a file path, or an http(s) URL fetched once without caching.
content = "content.json"

# When true, Identified and Rare items also appear under their category.
categories_include_featured = false

# ---------------------------------------------------------------------------
# Page
# ---------------------------------------------------------------------------
[site]
title = "Gallery"

# ---------------------------------------------------------------------------
# Section headings and empty states
# ---------------------------------------------------------------------------
[sections]
identified_title = "Identified"
rare_title = "Rare Series"
categories_title = "Categories"

# Shown in place of an empty card grid.
empty_grid = "Nothing here yet."

# Shown when no category has any items.
empty_categories = "No category items yet."

# ---------------------------------------------------------------------------
# Media
# ---------------------------------------------------------------------------
[media]
# Preview locators with these suffixes (case-insensitive) render as video.
video_extensions = [".mp4", ".webm", ".mov"]

# Fraction of a video that must be visible before it loads and plays (0-1].
visibility_threshold = 0.35
"##
}
