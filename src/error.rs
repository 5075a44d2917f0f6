//! Error types for docling-chunker
//!
//! Internal detectors, packers and strategies are honestly fallible and
//! propagate these errors. Only the orchestrator boundary turns a failure
//! into the sentinel `error` chunk.

use thiserror::Error;

/// Main error type for chunking operations
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Invalid chunking configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file is larger than the configured ceiling
    #[error("File too large: {path} ({size_mb:.2} MB exceeds limit of {limit_mb:.2} MB)")]
    SizeLimitExceeded {
        path: String,
        size_mb: f64,
        limit_mb: f64,
    },

    /// Input that cannot be treated as markdown text
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Text processing errors
    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChunkingError {
    /// Whether this error must reach the caller instead of being collapsed
    /// into an error chunk.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChunkingError::Config(_) | ChunkingError::SizeLimitExceeded { .. }
        )
    }
}

/// Result type alias for chunking operations
pub type Result<T> = std::result::Result<T, ChunkingError>;
