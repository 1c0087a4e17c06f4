//! Fixed-size token chunking with overlap.
//!
//! Flat text is cut into windows of roughly `chunk_size` tokens. Each cut is
//! moved to the nearest paragraph, sentence or word break, and consecutive
//! windows share about `overlap` tokens of text.

use tracing::debug;
use vectorizer_core::{ChunkConfig, Error, Result};

use crate::boundary::find_break;
use crate::tokenizer::TokenEstimator;

/// Split flat text into overlapping token windows.
///
/// Text that already fits in `chunk_size` tokens comes back as a single
/// chunk, unchanged.
pub fn chunk_by_tokens(
    text: &str,
    config: &ChunkConfig,
    estimator: &dyn TokenEstimator,
) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let total_tokens = estimator.count_tokens(text);
    debug!(
        "Chunking text: {} bytes, ~{} tokens, chunk_size={}, overlap={}",
        text.len(),
        total_tokens,
        config.chunk_size,
        config.overlap
    );

    if total_tokens <= config.chunk_size {
        return Ok(vec![text.to_string()]);
    }

    let len = text.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let rest = &text[start..];
        let end = segment_end(rest, config.chunk_size, estimator);
        let chunk = &rest[..end];
        let chunk_tokens = estimator.count_tokens(chunk);

        debug!(
            "Chunk {}: offset={}, length={}, ~{} tokens",
            chunks.len(),
            start,
            end,
            chunk_tokens
        );
        chunks.push(chunk.to_string());

        let advance = if config.overlap > 0 && config.overlap < chunk_tokens {
            overlap_start(chunk, chunk_tokens - config.overlap, estimator)
        } else {
            end
        };

        let next = start + advance;
        ensure_progress("token chunking", start, next)?;
        start = next;

        if start >= len {
            break;
        }
        start = skip_whitespace(text, start);
    }

    debug!("Created {} chunks from text", chunks.len());
    Ok(chunks)
}

/// Cut `text` into consecutive pieces of at most about `max_tokens`, without
/// overlap. Whitespace between pieces is dropped.
pub fn split_segments<'a>(
    text: &'a str,
    max_tokens: usize,
    estimator: &dyn TokenEstimator,
) -> Result<Vec<&'a str>> {
    let len = text.len();
    let mut segments = Vec::new();
    let mut start = 0;

    while start < len {
        let rest = &text[start..];
        let end = segment_end(rest, max_tokens, estimator);
        segments.push(&rest[..end]);

        let next = start + end;
        ensure_progress("segment split", start, next)?;
        start = skip_whitespace(text, next);
    }

    Ok(segments)
}

/// Length of the next window of `rest`, snapped to a break point.
///
/// Never zero for non-empty input.
fn segment_end(rest: &str, max_tokens: usize, estimator: &dyn TokenEstimator) -> usize {
    let target = estimator.char_offset_for_tokens(rest, max_tokens);
    let end = find_break(rest, target, rest.len());
    if end > 0 {
        end
    } else if target > 0 {
        target
    } else {
        rest.len()
    }
}

/// Where the next window starts inside `chunk` so that roughly the last
/// `chunk_tokens - keep_tokens` tokens are repeated.
///
/// The start is pushed forward to the next whitespace so the following window
/// does not open mid-word. Without whitespace before the end of the chunk
/// there is no overlap at all.
fn overlap_start(chunk: &str, keep_tokens: usize, estimator: &dyn TokenEstimator) -> usize {
    let bytes = chunk.as_bytes();
    let end = chunk.len();
    let from = estimator.char_offset_for_tokens(chunk, keep_tokens);

    (from..end)
        .find(|&i| matches!(bytes[i], b' ' | b'\n' | b'\t'))
        .unwrap_or(end)
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut offset = from;
    while offset < bytes.len() && matches!(bytes[offset], b' ' | b'\t' | b'\n' | b'\r') {
        offset += 1;
    }
    offset
}

fn ensure_progress(stage: &'static str, before: usize, after: usize) -> Result<()> {
    if after > before {
        Ok(())
    } else {
        Err(Error::NoProgress {
            stage,
            offset: before,
        })
    }
}
