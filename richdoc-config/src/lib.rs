//! Shared configuration loader for the richdoc toolchain.
//!
//! `defaults/richdoc.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`RichdocConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use richdoc_babel::doc::MarkKind;
use richdoc_babel::{HardBreakStyle, PreviewMode, RenderOptions};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError as Error;

const DEFAULT_TOML: &str = include_str!("../defaults/richdoc.default.toml");

/// Top-level configuration consumed by richdoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RichdocConfig {
    pub render: RenderConfig,
    pub preview: PreviewConfig,
}

/// Mirrors the knobs exposed by [`RenderOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub mark_order: Vec<MarkKind>,
    pub bullet_marker: char,
    pub hard_break: HardBreakStyle,
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            mark_order: config.mark_order,
            bullet_marker: config.bullet_marker,
            hard_break: config.hard_break,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            mark_order: config.mark_order.clone(),
            bullet_marker: config.bullet_marker,
            hard_break: config.hard_break,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    pub markdown_mode: PreviewMode,
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
    pub fn build(self) -> Result<RichdocConfig, ConfigError> {
        let config: RichdocConfig = self.builder.build()?.try_deserialize()?;
        if !matches!(config.render.bullet_marker, '-' | '*' | '+') {
            return Err(ConfigError::Message(format!(
                "render.bullet_marker must be one of '-', '*', '+' (got '{}')",
                config.render.bullet_marker
            )));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RichdocConfig, ConfigError> {
    Loader::new().build()
}
