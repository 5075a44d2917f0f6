//! Page-aware strategy
//!
//! Slices the text into page-sized sections when the extraction engine
//! reported a page count. Without one it behaves exactly like the structural
//! strategy, including its provenance.

use super::{ChunkingStrategy, StrategyKind, StructuralStrategy, chunk_with};
use crate::config::ChunkingConfig;
use crate::document::DocumentInput;
use crate::error::Result;
use crate::text::{Chunk, Segment, detect_pages};

pub struct PageAwareStrategy {
    fallback: StructuralStrategy,
}

impl PageAwareStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fallback: StructuralStrategy::new()?,
        })
    }
}

impl ChunkingStrategy for PageAwareStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PageAware
    }

    fn detect(&self, document: &DocumentInput, config: &ChunkingConfig) -> Result<Vec<Segment>> {
        match document.known_page_count() {
            Some(pages) => Ok(detect_pages(&document.markdown, pages)),
            None => self.fallback.detect(document, config),
        }
    }

    fn chunk(&self, document: &DocumentInput, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
        if document.known_page_count().is_none() {
            log::debug!(
                "No page count for {}, falling back to structural chunking",
                document.file_identifier
            );
            return self.fallback.chunk(document, config);
        }
        chunk_with(self, document, config)
    }
}
