//! Vectorizer Core — chunking configuration, strategy selection, error types.

pub mod config;
pub mod error;
pub mod strategy;

pub use config::{ChunkOverrides, ChunkSettings};
pub use error::{Error, Result};
pub use strategy::{ChunkConfig, ChunkStrategy};
