//! Gallery configuration.
//!
//! Handles loading and validating `gallery.toml`. Configuration is sparse:
//! stock defaults cover everything, and a config file overrides only the
//! values it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! locale = "en"                # Locale for captions and category labels
//!
//! [carousel]
//! loop_slides = true           # Wrap from the last slide back to the first
//!
//! [gestures]
//! swipe_close_threshold = 80.0 # Horizontal travel (px) that closes the lightbox
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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

/// Engine configuration, loaded from `gallery.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Locale used to resolve category labels and captions.
    pub locale: String,
    pub carousel: CarouselConfig,
    pub gestures: GestureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Whether the lightbox carousel wraps around at the ends.
    pub loop_slides: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Horizontal swipe travel, in pixels, past which the lightbox closes.
    pub swipe_close_threshold: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            locale: crate::content::DEFAULT_LOCALE.to_string(),
            carousel: CarouselConfig::default(),
            gestures: GestureConfig::default(),
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig { loop_slides: true }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            swipe_close_threshold: 80.0,
        }
    }
}

impl GalleryConfig {
    /// Check value ranges. Serde catches shape errors; this catches values
    /// that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Validation(
                "locale must not be empty".to_string(),
            ));
        }
        if !self.gestures.swipe_close_threshold.is_finite()
            || self.gestures.swipe_close_threshold <= 0.0
        {
            return Err(ConfigError::Validation(format!(
                "gestures.swipe_close_threshold must be a positive number, got {}",
                self.gestures.swipe_close_threshold
            )));
        }
        Ok(())
    }
}

/// Load `gallery.toml` from a directory, falling back to stock defaults when
/// the file doesn't exist. A file that exists but doesn't parse or validate
/// is an error — a present config is a statement of intent.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let path = dir.join("gallery.toml");
    if !path.exists() {
        tracing::debug!(dir = %dir.display(), "no gallery.toml, using defaults");
        return Ok(GalleryConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: GalleryConfig = toml::from_str(&content)?;
    config.validate()?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
