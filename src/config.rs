//! Configuration for docling-chunker
//!
//! `ChunkingConfig` is validated on construction and on deserialization, so
//! every value in circulation satisfies `min_chunk_size < max_chunk_size` and
//! `overlap_size < max_chunk_size`.

use crate::error::{ChunkingError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default upper bound on chunk length in characters
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 2000;

/// Default advisory lower bound on chunk length in characters
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 300;

/// Default overlap carried between split chunks in characters
pub const DEFAULT_OVERLAP_SIZE: usize = 200;

/// Token estimation method
///
/// Both methods currently estimate `characters / 4`. `Precise` is reserved
/// for a real tokenizer and is a known approximation until one is wired in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenEstimation {
    #[default]
    Simple,
    Precise,
}

impl TokenEstimation {
    /// Estimate the token count of `text`
    pub fn estimate(&self, text: &str) -> usize {
        match self {
            TokenEstimation::Simple | TokenEstimation::Precise => text.chars().count() / 4,
        }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawChunkingConfig")]
pub struct ChunkingConfig {
    max_chunk_size: usize,
    min_chunk_size: usize,
    overlap_size: usize,
    preserve_structure: bool,
    token_estimation_method: TokenEstimation,
}

impl ChunkingConfig {
    /// Create a validated configuration
    pub fn new(max_chunk_size: usize, min_chunk_size: usize, overlap_size: usize) -> Result<Self> {
        if max_chunk_size == 0 {
            return Err(ChunkingError::Config(
                "max_chunk_size must be greater than zero".to_string(),
            ));
        }
        if max_chunk_size <= min_chunk_size {
            return Err(ChunkingError::Config(format!(
                "max_chunk_size ({}) must be greater than min_chunk_size ({})",
                max_chunk_size, min_chunk_size
            )));
        }
        if overlap_size >= max_chunk_size {
            return Err(ChunkingError::Config(format!(
                "overlap_size ({}) must be less than max_chunk_size ({})",
                overlap_size, max_chunk_size
            )));
        }

        Ok(Self {
            max_chunk_size,
            min_chunk_size,
            overlap_size,
            preserve_structure: true,
            token_estimation_method: TokenEstimation::Simple,
        })
    }

    /// Create a configuration from a maximum size and overlap, keeping the default minimum
    pub fn with_sizes(max_chunk_size: usize, overlap_size: usize) -> Result<Self> {
        Self::new(max_chunk_size, DEFAULT_MIN_CHUNK_SIZE, overlap_size)
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            if e.is_data() {
                ChunkingError::Config(e.to_string())
            } else {
                ChunkingError::Json(e)
            }
        })
    }

    pub fn with_preserve_structure(mut self, preserve_structure: bool) -> Self {
        self.preserve_structure = preserve_structure;
        self
    }

    pub fn with_token_estimation(mut self, method: TokenEstimation) -> Self {
        self.token_estimation_method = method;
        self
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    pub fn overlap_size(&self) -> usize {
        self.overlap_size
    }

    pub fn preserve_structure(&self) -> bool {
        self.preserve_structure
    }

    pub fn token_estimation_method(&self) -> TokenEstimation {
        self.token_estimation_method
    }

    /// Estimate tokens with the configured method
    pub fn estimate_tokens(&self, text: &str) -> usize {
        self.token_estimation_method.estimate(text)
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
            preserve_structure: true,
            token_estimation_method: TokenEstimation::Simple,
        }
    }
}

/// Unvalidated shape of a configuration as it appears on disk
#[derive(Deserialize)]
#[serde(default)]
struct RawChunkingConfig {
    max_chunk_size: usize,
    min_chunk_size: usize,
    overlap_size: usize,
    preserve_structure: bool,
    token_estimation_method: TokenEstimation,
}

impl Default for RawChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
            preserve_structure: true,
            token_estimation_method: TokenEstimation::Simple,
        }
    }
}

impl TryFrom<RawChunkingConfig> for ChunkingConfig {
    type Error = ChunkingError;

    fn try_from(raw: RawChunkingConfig) -> Result<Self> {
        Ok(
            ChunkingConfig::new(raw.max_chunk_size, raw.min_chunk_size, raw.overlap_size)?
                .with_preserve_structure(raw.preserve_structure)
                .with_token_estimation(raw.token_estimation_method),
        )
    }
}
