//! Strategy dispatch.

use tracing::warn;
use vectorizer_core::{ChunkConfig, ChunkStrategy, Result};

use crate::hybrid::{chunk_hybrid, chunk_structural};
use crate::token::chunk_by_tokens;
use crate::tokenizer::TokenEstimator;

/// Chunk `content` with the strategy named in `config`.
///
/// Strategies without an implementation log a warning and use token
/// chunking. Empty content yields no chunks.
pub fn chunk_text(
    content: &str,
    config: &ChunkConfig,
    estimator: &dyn TokenEstimator,
) -> Result<Vec<String>> {
    if content.is_empty() {
        return Ok(Vec::new());
    }

    if !config.strategy.is_implemented() {
        warn!(
            "Chunking strategy '{}' not yet implemented, using token_based",
            config.strategy
        );
        return chunk_by_tokens(content, config, estimator);
    }

    match config.strategy {
        ChunkStrategy::Hybrid => chunk_hybrid(content, config, estimator),
        ChunkStrategy::Markdown => chunk_structural(content, config, estimator),
        _ => chunk_by_tokens(content, config, estimator),
    }
}
