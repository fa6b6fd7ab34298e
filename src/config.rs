//! Checker configuration.
//!
//! Defaults come from [`CheckerConfig::v0`]; [`CheckerConfig::load`] layers a
//! TOML file and `PLAGIARISM_*` environment variables on top using Figment.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_PREFIX: &str = "PLAGIARISM_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] figment::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Lexical,
    VectorSpace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSpaceConfig {
    /// Terms shorter than this many characters are left out of the vocabulary.
    pub min_term_chars: usize,
    /// Use `1 + ln(tf)` instead of raw counts.
    pub sublinear_tf: bool,
    /// Add one to document counts when computing IDF.
    pub smooth_idf: bool,
}

impl Default for VectorSpaceConfig {
    fn default() -> Self {
        Self {
            min_term_chars: 1,
            sublinear_tf: false,
            smooth_idf: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Uploads beyond this size are truncated.
    pub max_bytes: usize,
    /// Extensions decoded as UTF-8 text, compared case-insensitively.
    /// PDF and word-processor extensions are rejected even if listed.
    pub allowed_extensions: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            allowed_extensions: vec!["txt".into()],
        }
    }
}

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    pub strategy: StrategyKind,
    pub vector_space: VectorSpaceConfig,
    pub extraction: ExtractionConfig,
    /// Leave a submitter's own earlier submissions out of their corpus.
    pub exclude_own_submissions: bool,
    /// Scores at or above this percentage are flagged.
    pub flag_threshold: f64,
}

impl CheckerConfig {
    pub fn v0() -> Self {
        Self {
            strategy: StrategyKind::Lexical,
            vector_space: VectorSpaceConfig::default(),
            extraction: ExtractionConfig::default(),
            exclude_own_submissions: false,
            flag_threshold: 50.0,
        }
    }

    /// Defaults, then `path` if it exists, then `PLAGIARISM_*` variables
    /// (nested keys separated by `__`, e.g. `PLAGIARISM_VECTOR_SPACE__SUBLINEAR_TF`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::v0()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(figment)
    }

    /// Defaults overlaid with an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::v0())).merge(Toml::string(toml));
        Self::from_figment(figment)
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.flag_threshold) {
            return Err(ConfigError::Invalid(format!(
                "flag_threshold must be in [0, 100], got {}",
                self.flag_threshold
            )));
        }
        if self.vector_space.min_term_chars == 0 {
            return Err(ConfigError::Invalid(
                "vector_space.min_term_chars must be at least 1".into(),
            ));
        }
        if self.extraction.max_bytes == 0 {
            return Err(ConfigError::Invalid("extraction.max_bytes must be positive".into()));
        }
        if self.extraction.allowed_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "extraction.allowed_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::v0()
    }
}
