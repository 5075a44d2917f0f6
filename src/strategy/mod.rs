//! Chunking strategies for docling-chunker
//!
//! The strategy set is closed: structural, table-aware and page-aware. Each
//! one pairs a boundary detector with the shared packer. The effective
//! configuration is passed on every call, strategies hold no mutable state.

pub mod page_aware;
pub mod structural;
pub mod table_aware;

pub use page_aware::PageAwareStrategy;
pub use structural::StructuralStrategy;
pub use table_aware::TableAwareStrategy;

use crate::config::ChunkingConfig;
use crate::document::{ClassificationHint, DocumentInput};
use crate::error::{ChunkingError, Result};
use crate::text::boundary::{self, Segment};
use crate::text::{Chunk, ChunkPacker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Request name that lets the orchestrator pick a strategy
pub const AUTO_STRATEGY: &str = "auto";

/// Pipe characters above which a document is treated as tabular
const TABLE_PIPE_THRESHOLD: usize = 10;

/// `#` characters above which a PDF is treated as page-structured
const PAGE_HEADER_THRESHOLD: usize = 5;

/// Available chunking strategies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Structural,
    TableAware,
    PageAware,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Structural,
        StrategyKind::TableAware,
        StrategyKind::PageAware,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Structural => "structural",
            StrategyKind::TableAware => "table_aware",
            StrategyKind::PageAware => "page_aware",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = ChunkingError;

    fn from_str(s: &str) -> Result<Self> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChunkingError::Config(format!("Unknown chunking strategy: {}", s)))
    }
}

/// A segmentation policy over extracted markdown
pub trait ChunkingStrategy {
    fn kind(&self) -> StrategyKind;

    /// Partition the document into ordered segments
    fn detect(&self, document: &DocumentInput, config: &ChunkingConfig) -> Result<Vec<Segment>>;

    /// Chunk the document with the given configuration
    fn chunk(&self, document: &DocumentInput, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
        chunk_with(self, document, config)
    }
}

/// Detect then pack, honouring `preserve_structure`
pub fn chunk_with<S: ChunkingStrategy + ?Sized>(
    strategy: &S,
    document: &DocumentInput,
    config: &ChunkingConfig,
) -> Result<Vec<Chunk>> {
    boundary::validate_markdown(&document.markdown)?;

    let segments = if config.preserve_structure() {
        strategy.detect(document, config)?
    } else {
        boundary::whole_document(&document.markdown)
    };

    let chunks = ChunkPacker::new(config, strategy.kind()).pack(&segments);
    log::debug!(
        "{} strategy: {} segments -> {} chunks for {}",
        strategy.kind(),
        segments.len(),
        chunks.len(),
        document.file_identifier
    );

    Ok(chunks)
}

/// Pick a strategy from content signals and the optional classification
pub fn select_strategy(markdown: &str, classification: Option<&ClassificationHint>) -> StrategyKind {
    let pipe_count = markdown.matches('|').count();
    if pipe_count > TABLE_PIPE_THRESHOLD {
        return StrategyKind::TableAware;
    }

    let is_pdf = classification.is_some_and(|hint| hint.type_name.contains("PDF"));
    if is_pdf && markdown.matches('#').count() > PAGE_HEADER_THRESHOLD {
        return StrategyKind::PageAware;
    }

    StrategyKind::Structural
}
