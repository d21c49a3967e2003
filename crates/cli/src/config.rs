//! # CLI Configuration
//!
//! Loads the `rentlaw` configuration in layers: built-in defaults, an optional
//! YAML file (`rentlaw.yml` in the working directory, or an explicit path), and
//! `RENTLAW_`-prefixed environment variables (e.g. `RENTLAW_PARAGRAPH_PATTERN`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use rentlaw::patterns::{CHAPTER_HEADING_PATTERN, PARAGRAPH_HEADING_PATTERN};
use rentlaw::{HeadingPatterns, SegmentError};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// The configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rentlaw.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    General(#[from] config::ConfigError),
    #[error("Config file not found at '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Pattern(#[from] SegmentError),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Chapter heading pattern with one capture group around the heading.
    #[serde(default = "default_chapter_pattern")]
    pub chapter_pattern: String,
    /// Paragraph heading pattern with one capture group around the heading.
    #[serde(default = "default_paragraph_pattern")]
    pub paragraph_pattern: String,
    /// The statutory PDF used when no input is given on the command line.
    #[serde(default)]
    pub law_pdf: Option<String>,
}

fn default_chapter_pattern() -> String {
    CHAPTER_HEADING_PATTERN.to_string()
}

fn default_paragraph_pattern() -> String {
    PARAGRAPH_HEADING_PATTERN.to_string()
}

impl AppConfig {
    /// Compiles the configured heading patterns.
    pub fn heading_patterns(&self) -> Result<HeadingPatterns, ConfigError> {
        Ok(HeadingPatterns::new(
            &self.chapter_pattern,
            &self.paragraph_pattern,
        )?)
    }
}

/// Loads the configuration.
///
/// An explicit `config_path_override` must exist; the default `rentlaw.yml`
/// is optional.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("chapter_pattern", CHAPTER_HEADING_PATTERN)?
        .set_default("paragraph_pattern", PARAGRAPH_HEADING_PATTERN)?;

    match config_path_override {
        Some(path) => {
            if !Path::new(path).exists() {
                return Err(ConfigError::NotFound(path.to_string()));
            }
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::new(path, FileFormat::Yaml));
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
            builder = builder.add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml));
        }
        None => {}
    }

    let settings = builder
        .add_source(Environment::with_prefix("RENTLAW").prefix_separator("_"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
