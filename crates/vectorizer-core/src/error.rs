//! Error types for the vectorizer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid chunking strategy: {0}")]
    InvalidStrategy(i64),

    #[error("No progress in {stage} at byte offset {offset}")]
    NoProgress { stage: &'static str, offset: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
