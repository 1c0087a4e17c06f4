//! Token estimation.
//!
//! The `TokenEstimator` trait abstracts over how text is measured in tokens.
//! `CharEstimator` is the only implementation today: four characters per
//! token, counted in Unicode scalar values. An exact subword tokenizer can
//! replace it without touching the chunkers, which only see the trait.

use std::sync::Arc;

/// Characters per token assumed by the approximation.
pub const CHARS_PER_TOKEN: usize = 4;

/// Measures text in tokens.
pub trait TokenEstimator: Send + Sync {
    /// Number of tokens in `text`. Zero for empty text.
    fn count_tokens(&self, text: &str) -> usize;

    /// Byte offset at which the first `target_tokens` tokens of `text` end.
    ///
    /// Always a char boundary, never past `text.len()`.
    fn char_offset_for_tokens(&self, text: &str, target_tokens: usize) -> usize;

    /// Model the estimator was created for.
    fn model(&self) -> &str;
}

/// Character-count approximation (`ceil(chars / 4)`).
///
/// The model name is carried for reporting only.
#[derive(Debug, Clone, Default)]
pub struct CharEstimator {
    model: String,
}

impl CharEstimator {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl TokenEstimator for CharEstimator {
    fn count_tokens(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let chars = text.chars().count();
        let tokens = chars.div_ceil(CHARS_PER_TOKEN);
        tracing::trace!("Token count estimate: {} (from {} characters)", tokens, chars);
        tokens
    }

    fn char_offset_for_tokens(&self, text: &str, target_tokens: usize) -> usize {
        if target_tokens == 0 {
            return 0;
        }
        let budget = target_tokens.saturating_mul(CHARS_PER_TOKEN);
        text.char_indices()
            .nth(budget)
            .map(|(offset, _)| offset)
            .unwrap_or(text.len())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Create the estimator for a model.
///
/// Every model uses the character approximation for now.
pub fn create_estimator(model: &str) -> Arc<dyn TokenEstimator> {
    tracing::debug!("Using approximate token estimator for model '{}'", model);
    Arc::new(CharEstimator::new(model))
}
