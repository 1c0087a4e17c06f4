//! Structure-aware chunkers.
//!
//! Both chunkers detect markdown, parse it into elements and render each
//! resulting chunk with its heading breadcrumb. The hybrid chunker also runs
//! the split and merge refinement passes; the structural one only splits
//! elements that are too large on their own.

use tracing::debug;
use vectorizer_core::{ChunkConfig, Result};

use crate::refine::{merge_threshold, merge_undersized, split_oversized, Chunk};
use crate::structure::{
    is_likely_markdown, parse_markdown_structure, ElementKind, StructuralElement,
};
use crate::token::chunk_by_tokens;
use crate::tokenizer::TokenEstimator;

/// Structure-aware chunking with size refinement.
///
/// Text that does not look like markdown is handed to the token chunker. A
/// heading directly followed by an element with the same breadcrumb is folded
/// into that element's `[Context: ...]` prefix instead of becoming its own chunk.
pub fn chunk_hybrid(
    text: &str,
    config: &ChunkConfig,
    estimator: &dyn TokenEstimator,
) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if !is_likely_markdown(text) {
        debug!("Content is not markdown, falling back to token chunking");
        return chunk_by_tokens(text, config, estimator);
    }

    debug!(
        "Hybrid chunking: chunk_size={}, overlap={}",
        config.chunk_size, config.overlap
    );

    let elements = parse_markdown_structure(text, estimator);
    let chunks = fold_headings(elements);
    if chunks.is_empty() {
        return Ok(Vec::new());
    }
    debug!("Initial chunks from structure: {}", chunks.len());

    let chunks = split_oversized(chunks, config.chunk_size, estimator)?;
    debug!("After split pass: {} chunks", chunks.len());

    let chunks = merge_undersized(
        chunks,
        merge_threshold(config.chunk_size),
        config.chunk_size,
        estimator,
    );
    debug!("After merge pass: {} chunks", chunks.len());

    Ok(render_chunks(&chunks))
}

/// Structure-aware chunking without merging ("markdown" strategy).
///
/// Each element becomes one chunk unless it exceeds `chunk_size`, in which
/// case it is cut at break points without overlap.
pub fn chunk_structural(
    text: &str,
    config: &ChunkConfig,
    estimator: &dyn TokenEstimator,
) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if !is_likely_markdown(text) {
        debug!("Content is not markdown, falling back to token chunking");
        return chunk_by_tokens(text, config, estimator);
    }

    let chunks: Vec<Chunk> = parse_markdown_structure(text, estimator)
        .into_iter()
        .filter(|element| element.kind != ElementKind::HorizontalRule)
        .map(Chunk::from)
        .collect();
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let chunks = split_oversized(chunks, config.chunk_size, estimator)?;
    debug!("Structural chunking produced {} chunks", chunks.len());

    Ok(render_chunks(&chunks))
}

/// Render chunks in order, each with its `[Context: ...]` prefix.
pub fn render_chunks(chunks: &[Chunk]) -> Vec<String> {
    chunks.iter().map(Chunk::render).collect()
}

impl From<StructuralElement> for Chunk {
    fn from(element: StructuralElement) -> Self {
        Self {
            content: element.content,
            token_count: element.token_count,
            heading_context: element.heading_context,
            index: 0,
        }
    }
}

/// Map elements to initial chunks for the refinement passes.
///
/// Rules are dropped. A heading followed directly by an element under the
/// same breadcrumb is dropped as well, since the rendered prefix names it.
fn fold_headings(elements: Vec<StructuralElement>) -> Vec<Chunk> {
    let elements: Vec<StructuralElement> = elements
        .into_iter()
        .filter(|element| element.kind != ElementKind::HorizontalRule)
        .collect();

    let keep: Vec<bool> = elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            element.kind != ElementKind::Heading
                || elements
                    .get(i + 1)
                    .map_or(true, |next| next.heading_context != element.heading_context)
        })
        .collect();

    let mut chunks: Vec<Chunk> = elements
        .into_iter()
        .zip(keep)
        .filter_map(|(element, keep)| keep.then(|| Chunk::from(element)))
        .collect();

    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.index = index;
    }
    chunks
}
