//! Size refinement for structure-derived chunks.
//!
//! Two passes run over the chunk list:
//! 1. split: chunks above the token limit are cut at break points, each piece
//!    keeping the source heading context;
//! 2. merge: runs of small neighbours under the same heading context are
//!    joined while the result stays within the limit.

use serde::Serialize;
use tracing::debug;
use vectorizer_core::Result;

use crate::token::split_segments;
use crate::tokenizer::TokenEstimator;

/// Smallest `min_tokens` the merge pass uses.
pub const MIN_MERGE_TOKENS: usize = 20;

/// A piece of output text with its heading breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub content: String,
    pub token_count: usize,
    pub heading_context: Option<String>,
    /// Position in the current chunk sequence.
    pub index: usize,
}

impl Chunk {
    pub fn new(
        content: impl Into<String>,
        heading_context: Option<String>,
        estimator: &dyn TokenEstimator,
    ) -> Self {
        let content = content.into();
        Self {
            token_count: estimator.count_tokens(&content),
            content,
            heading_context,
            index: 0,
        }
    }

    /// Output text, prefixed with `[Context: ...]` when a breadcrumb is set.
    pub fn render(&self) -> String {
        match self.heading_context.as_deref() {
            Some(context) if !context.is_empty() => {
                format!("[Context: {}]\n\n{}", context, self.content)
            }
            _ => self.content.clone(),
        }
    }
}

/// Merge threshold for a target chunk size: a quarter of it, at least
/// [`MIN_MERGE_TOKENS`].
pub fn merge_threshold(chunk_size: usize) -> usize {
    (chunk_size / 4).max(MIN_MERGE_TOKENS)
}

/// Pass 1: cut chunks above `max_tokens` into pieces that fit.
pub fn split_oversized(
    chunks: Vec<Chunk>,
    max_tokens: usize,
    estimator: &dyn TokenEstimator,
) -> Result<Vec<Chunk>> {
    let mut result = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        if chunk.token_count <= max_tokens {
            result.push(chunk);
            continue;
        }

        let pieces = split_segments(&chunk.content, max_tokens, estimator)?;
        debug!(
            "Split {}-token chunk into {} pieces",
            chunk.token_count,
            pieces.len()
        );
        result.extend(
            pieces
                .into_iter()
                .map(|piece| Chunk::new(piece, chunk.heading_context.clone(), estimator)),
        );
    }

    reindex(&mut result);
    Ok(result)
}

/// Pass 2: join consecutive chunks below `min_tokens` that share a heading
/// context, as long as the joined chunk stays within `max_tokens`.
///
/// A small chunk that cannot be merged is kept as it is.
pub fn merge_undersized(
    chunks: Vec<Chunk>,
    min_tokens: usize,
    max_tokens: usize,
    estimator: &dyn TokenEstimator,
) -> Vec<Chunk> {
    let mut result = Vec::with_capacity(chunks.len());
    let mut pending: Option<Chunk> = None;

    for chunk in chunks {
        match pending.take() {
            None if chunk.token_count >= min_tokens => result.push(chunk),
            None => pending = Some(chunk),
            Some(mut acc) => {
                let same_context = acc.heading_context == chunk.heading_context;
                if same_context && acc.token_count + chunk.token_count <= max_tokens {
                    acc.content.push_str("\n\n");
                    acc.content.push_str(&chunk.content);
                    acc.token_count = estimator.count_tokens(&acc.content);
                    pending = Some(acc);
                } else {
                    result.push(acc);
                    if chunk.token_count >= min_tokens {
                        result.push(chunk);
                    } else {
                        pending = Some(chunk);
                    }
                }
            }
        }
    }

    if let Some(acc) = pending {
        result.push(acc);
    }

    reindex(&mut result);
    result
}

fn reindex(chunks: &mut [Chunk]) {
    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.index = index;
    }
}
