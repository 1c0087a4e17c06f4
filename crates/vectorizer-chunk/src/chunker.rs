//! Document chunking service: settings, estimator and dispatch in one place.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::info;
use vectorizer_core::{ChunkConfig, ChunkOverrides, ChunkSettings, Result};

use crate::dispatch::chunk_text;
use crate::preprocess::strip_non_ascii;
use crate::tokenizer::{create_estimator, TokenEstimator};

/// Chunks documents using deployment settings and per-call overrides.
///
/// Holds no mutable state; one instance can be shared across threads.
pub struct DocumentChunker {
    settings: ChunkSettings,
    estimator: Arc<dyn TokenEstimator>,
}

impl DocumentChunker {
    /// Build a chunker with the estimator for `settings.model`.
    pub fn new(settings: ChunkSettings) -> Self {
        let estimator = create_estimator(&settings.model);
        Self::with_estimator(settings, estimator)
    }

    pub fn with_estimator(settings: ChunkSettings, estimator: Arc<dyn TokenEstimator>) -> Self {
        Self {
            settings,
            estimator,
        }
    }

    pub fn settings(&self) -> &ChunkSettings {
        &self.settings
    }

    pub fn estimator(&self) -> &dyn TokenEstimator {
        self.estimator.as_ref()
    }

    /// Chunk a document, resolving strategy and sizes from `overrides` and
    /// the settings.
    pub fn chunk_document(&self, content: &str, overrides: &ChunkOverrides) -> Result<Vec<String>> {
        let config = self.settings.resolve(overrides)?;
        self.chunk_with(content, &config)
    }

    /// Chunk a document with an explicit configuration.
    pub fn chunk_with(&self, content: &str, config: &ChunkConfig) -> Result<Vec<String>> {
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let text = if self.settings.strip_non_ascii {
            strip_non_ascii(content)
        } else {
            Cow::Borrowed(content)
        };

        let chunks = chunk_text(&text, config, self.estimator.as_ref())?;
        info!(
            "Chunked document ({} bytes) into {} chunks with strategy {}",
            content.len(),
            chunks.len(),
            config.strategy
        );
        Ok(chunks)
    }
}

impl Default for DocumentChunker {
    fn default() -> Self {
        Self::new(ChunkSettings::default())
    }
}
