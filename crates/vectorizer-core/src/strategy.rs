//! Chunking strategies and the per-call chunk configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default target chunk size in tokens.
pub const DEFAULT_CHUNK_SIZE: usize = 400;
/// Default overlap between consecutive token chunks, in tokens.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// How a document is split into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Fixed token windows with overlap.
    #[default]
    #[serde(rename = "token_based", alias = "token")]
    Token,
    /// Embedding-driven boundaries. Not implemented, runs as `Token`.
    Semantic,
    /// Markdown structure, one chunk per element, no refinement.
    Markdown,
    /// Sentence packing. Not implemented, runs as `Token`.
    Sentence,
    /// Separator recursion. Not implemented, runs as `Token`.
    Recursive,
    /// Markdown structure followed by split and merge refinement.
    Hybrid,
}

impl ChunkStrategy {
    /// Parse a strategy name, ignoring case.
    ///
    /// Unknown names are logged and resolve to [`ChunkStrategy::Token`].
    pub fn parse(name: &str) -> Self {
        match Self::from_name(name) {
            Some(strategy) => strategy,
            None => {
                tracing::warn!("Unknown chunk strategy '{}', defaulting to token_based", name);
                Self::Token
            }
        }
    }

    /// Strict lookup used by [`ChunkStrategy::parse`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "token_based" | "token" => Some(Self::Token),
            "semantic" => Some(Self::Semantic),
            "markdown" => Some(Self::Markdown),
            "sentence" => Some(Self::Sentence),
            "recursive" => Some(Self::Recursive),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    /// Whether the engine has a dedicated chunker for this strategy.
    pub fn is_implemented(&self) -> bool {
        matches!(self, Self::Token | Self::Markdown | Self::Hybrid)
    }

    /// Stable numeric code, as stored by callers that persist strategies.
    pub fn code(&self) -> i64 {
        match self {
            Self::Token => 0,
            Self::Semantic => 1,
            Self::Markdown => 2,
            Self::Sentence => 3,
            Self::Recursive => 4,
            Self::Hybrid => 5,
        }
    }
}

impl TryFrom<i64> for ChunkStrategy {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Token),
            1 => Ok(Self::Semantic),
            2 => Ok(Self::Markdown),
            3 => Ok(Self::Sentence),
            4 => Ok(Self::Recursive),
            5 => Ok(Self::Hybrid),
            other => Err(Error::InvalidStrategy(other)),
        }
    }
}

impl std::fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token => write!(f, "token_based"),
            Self::Semantic => write!(f, "semantic"),
            Self::Markdown => write!(f, "markdown"),
            Self::Sentence => write!(f, "sentence"),
            Self::Recursive => write!(f, "recursive"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Fully resolved configuration for one chunking call.
///
/// `overlap` is expected to be smaller than `chunk_size`. The engine does not
/// enforce it: a chunk whose token count does not exceed `overlap` simply
/// gets no overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub strategy: ChunkStrategy,
    /// Target chunk size in tokens.
    pub chunk_size: usize,
    /// Tokens shared between consecutive token chunks.
    pub overlap: usize,
    /// Reserved for separator-driven strategies.
    #[serde(default)]
    pub separators: Option<String>,
}

impl ChunkConfig {
    pub fn new(strategy: ChunkStrategy, chunk_size: usize, overlap: usize) -> Self {
        Self {
            strategy,
            chunk_size,
            overlap,
            separators: None,
        }
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(ChunkStrategy::Token, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}
