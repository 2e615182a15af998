//! Shared configuration loader for the mdx toolchain.
//!
//! `defaults/mdx.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdx_babel::MediaOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdx.default.toml");

/// Top-level configuration consumed by mdx applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdxConfig {
    pub media: MediaConfig,
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
    pub logging: LoggingConfig,
}

/// Bounds applied by the media normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub image_width_min: u32,
    pub image_width_max: u32,
    pub default_aspect_ratio: f64,
}

impl From<MediaConfig> for MediaOptions {
    fn from(config: MediaConfig) -> Self {
        MediaOptions::from(&config)
    }
}

impl From<&MediaConfig> for MediaOptions {
    fn from(config: &MediaConfig) -> Self {
        MediaOptions {
            image_width_min: config.image_width_min,
            image_width_max: config.image_width_max,
            default_aspect_ratio: config.default_aspect_ratio,
        }
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub json: JsonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
}

/// Controls the tree view printed by `inspect`.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_marks: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdxConfig, ConfigError> {
    Loader::new().build()
}
