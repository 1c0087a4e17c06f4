//! Vectorizer Chunk — token estimation, break points, markdown structure, hybrid refinement.

pub mod boundary;
pub mod chunker;
pub mod dispatch;
pub mod hybrid;
pub mod preprocess;
pub mod refine;
pub mod structure;
pub mod token;
pub mod tokenizer;

pub use boundary::find_break;
pub use chunker::DocumentChunker;
pub use dispatch::chunk_text;
pub use hybrid::{chunk_hybrid, chunk_structural, render_chunks};
pub use preprocess::strip_non_ascii;
pub use refine::{merge_threshold, merge_undersized, split_oversized, Chunk};
pub use structure::{
    detect_indicators, is_likely_markdown, parse_markdown_structure, ElementKind, HeadingStack,
    Indicators, StructuralElement,
};
pub use token::{chunk_by_tokens, split_segments};
pub use tokenizer::{create_estimator, CharEstimator, TokenEstimator};

use vectorizer_core::{ChunkConfig, Result};

/// Chunk `content` with the character-count estimator.
pub fn chunk(content: &str, config: &ChunkConfig) -> Result<Vec<String>> {
    chunk_text(content, config, &CharEstimator::default())
}
