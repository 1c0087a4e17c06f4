//! Global chunking defaults and per-call overrides.
//!
//! `ChunkSettings` holds the defaults a deployment runs with. They load from a
//! JSON file, then environment variables take precedence. A caller turns the
//! settings plus its own `ChunkOverrides` into a `ChunkConfig` with
//! [`ChunkSettings::resolve`].

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::strategy::{ChunkConfig, ChunkStrategy, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

pub const DEFAULT_STRATEGY: &str = "token_based";
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Accepted chunk sizes, in tokens.
pub const CHUNK_SIZE_RANGE: RangeInclusive<usize> = 50..=2000;
/// Accepted overlaps, in tokens.
pub const CHUNK_OVERLAP_RANGE: RangeInclusive<usize> = 0..=500;

pub const ENV_STRATEGY: &str = "VECTORIZER_CHUNK_STRATEGY";
pub const ENV_CHUNK_SIZE: &str = "VECTORIZER_CHUNK_SIZE";
pub const ENV_CHUNK_OVERLAP: &str = "VECTORIZER_CHUNK_OVERLAP";
pub const ENV_STRIP_NON_ASCII: &str = "VECTORIZER_STRIP_NON_ASCII";
pub const ENV_MODEL: &str = "VECTORIZER_MODEL";

/// Deployment-wide chunking defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSettings {
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
    #[serde(default = "default_chunk_size")]
    pub default_chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub default_chunk_overlap: usize,
    /// Collapse non-ASCII runs to a space before chunking.
    #[serde(default = "default_strip_non_ascii")]
    pub strip_non_ascii: bool,
    /// Embedding model name, forwarded to the token estimator.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_strategy() -> String {
    DEFAULT_STRATEGY.into()
}
fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}
fn default_strip_non_ascii() -> bool {
    true
}
fn default_model() -> String {
    DEFAULT_MODEL.into()
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            strip_non_ascii: true,
            model: default_model(),
        }
    }
}

/// Per-call values that replace the defaults when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOverrides {
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub chunk_size: Option<usize>,
    #[serde(default)]
    pub overlap: Option<usize>,
}

impl ChunkSettings {
    /// Load settings from a JSON file, then apply environment variables.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };
        settings.apply_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        settings.apply_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_STRATEGY) {
            self.default_strategy = v;
        }
        if let Some(v) = get(ENV_CHUNK_SIZE) {
            self.default_chunk_size = parse_usize(ENV_CHUNK_SIZE, &v)?;
        }
        if let Some(v) = get(ENV_CHUNK_OVERLAP) {
            self.default_chunk_overlap = parse_usize(ENV_CHUNK_OVERLAP, &v)?;
        }
        if let Some(v) = get(ENV_STRIP_NON_ASCII) {
            self.strip_non_ascii = parse_bool(ENV_STRIP_NON_ASCII, &v)?;
        }
        if let Some(v) = get(ENV_MODEL) {
            self.model = v;
        }
        Ok(())
    }

    /// Check the numeric defaults against their accepted ranges.
    pub fn validate(&self) -> Result<()> {
        check_range("default_chunk_size", self.default_chunk_size, &CHUNK_SIZE_RANGE)?;
        check_range(
            "default_chunk_overlap",
            self.default_chunk_overlap,
            &CHUNK_OVERLAP_RANGE,
        )
    }

    /// The default strategy, parsed.
    pub fn strategy(&self) -> ChunkStrategy {
        ChunkStrategy::parse(&self.default_strategy)
    }

    /// Merge per-call overrides with these defaults.
    pub fn resolve(&self, overrides: &ChunkOverrides) -> Result<ChunkConfig> {
        let strategy = match &overrides.strategy {
            Some(name) => ChunkStrategy::parse(name),
            None => self.strategy(),
        };

        let chunk_size = overrides.chunk_size.unwrap_or(self.default_chunk_size);
        check_range("chunk_size", chunk_size, &CHUNK_SIZE_RANGE)?;

        let overlap = overrides.overlap.unwrap_or(self.default_chunk_overlap);
        check_range("overlap", overlap, &CHUNK_OVERLAP_RANGE)?;

        Ok(ChunkConfig::new(strategy, chunk_size, overlap))
    }
}

fn check_range(name: &str, value: usize, range: &RangeInclusive<usize>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} is not a number: '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{} is not a boolean: '{}'", key, value))),
    }
}
