//! Shared configuration loader for sectionize.
//!
//! `defaults/sectionize.default.toml` is embedded into every build so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`SectionizeConfig`], then turn the `[sections]` table
//! into validated [`SectionOptions`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use sectionize::{SectionOptions, SectionizeError};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/sectionize.default.toml");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Options(#[from] SectionizeError),
}

/// Top-level configuration consumed by sectionize applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionizeConfig {
    pub sections: SectionsConfig,
}

/// Class names applied while building sections.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionsConfig {
    pub section_cls: String,
    pub heading_cls: String,
}

impl SectionsConfig {
    /// Validate into the options the section builder runs with.
    pub fn to_options(&self) -> Result<SectionOptions, SectionizeError> {
        SectionOptions::new(self.section_cls.clone(), self.heading_cls.clone())
    }
}

/// Stacks `[sections]` tables: embedded defaults first, then files, then single-key overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only `section_cls = "section"` and `heading_cls = "title"`.
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Class names from a TOML file win over earlier layers. `build` fails if the file is missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Like [`Loader::with_file`], but a missing file leaves the class names as they were.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let layer = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(layer);
        self
    }

    /// Pin one key such as `sections.heading_cls` above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merged `[sections]` table, not yet checked for blank class names.
    pub fn build(self) -> Result<SectionizeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    /// Merged class names, validated into [`SectionOptions`].
    pub fn build_options(self) -> Result<SectionOptions, LoadError> {
        let config = self.build()?;
        Ok(config.sections.to_options()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded `[sections]` table on its own.
pub fn load_defaults() -> Result<SectionizeConfig, ConfigError> {
    Loader::new().build()
}

/// Section options from the defaults layered with an optional user file.
pub fn load_options(user_file: Option<&Path>) -> Result<SectionOptions, LoadError> {
    let loader = match user_file {
        Some(path) => Loader::new().with_optional_file(path),
        None => Loader::new(),
    };
    loader.build_options()
}
