//! ChunkingOrchestrator - Main chunking API
//!
//! Selects a strategy, runs it, and stamps document-level provenance onto
//! every chunk. Chunking failures are collapsed into a single `error` chunk
//! here and nowhere else; configuration and size-limit errors reach the
//! caller.

use crate::config::ChunkingConfig;
use crate::document::DocumentInput;
use crate::error::{ChunkingError, Result};
use crate::strategy::{
    AUTO_STRATEGY, ChunkingStrategy, PageAwareStrategy, StrategyKind, StructuralStrategy,
    TableAwareStrategy, select_strategy,
};
use crate::text::Chunk;
use crate::utils::{char_len, file_size_mb};

/// Main entry point for chunking extracted documents
pub struct ChunkingOrchestrator {
    config: ChunkingConfig,
    max_file_size_mb: Option<f64>,
    structural: StructuralStrategy,
    table_aware: TableAwareStrategy,
    page_aware: PageAwareStrategy,
}

impl ChunkingOrchestrator {
    /// Create an orchestrator with the given default configuration
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        Ok(Self {
            config,
            max_file_size_mb: None,
            structural: StructuralStrategy::new()?,
            table_aware: TableAwareStrategy::new(),
            page_aware: PageAwareStrategy::new()?,
        })
    }

    /// Create an orchestrator with default configuration
    pub fn with_default_config() -> Result<Self> {
        Self::new(ChunkingConfig::default())
    }

    /// Refuse source files larger than `limit_mb` megabytes
    pub fn with_max_file_size_mb(mut self, limit_mb: f64) -> Self {
        self.max_file_size_mb = Some(limit_mb);
        self
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    pub fn max_file_size_mb(&self) -> Option<f64> {
        self.max_file_size_mb
    }

    /// Implementation behind a strategy tag
    pub fn strategy(&self, kind: StrategyKind) -> &dyn ChunkingStrategy {
        match kind {
            StrategyKind::Structural => &self.structural,
            StrategyKind::TableAware => &self.table_aware,
            StrategyKind::PageAware => &self.page_aware,
        }
    }

    /// Resolve a requested strategy name
    ///
    /// `"auto"` selects from content signals. Unknown names are not an
    /// error: they fall back to the structural strategy with a warning.
    pub fn resolve_strategy(&self, requested: &str, document: &DocumentInput) -> StrategyKind {
        if requested == AUTO_STRATEGY {
            let kind = select_strategy(&document.markdown, document.classification.as_ref());
            log::debug!("Auto-selected {} strategy for {}", kind, document.file_identifier);
            return kind;
        }

        match requested.parse::<StrategyKind>() {
            Ok(kind) => kind,
            Err(_) => {
                log::warn!("Unknown strategy '{}', using structural strategy", requested);
                StrategyKind::Structural
            }
        }
    }

    /// Chunk a document
    ///
    /// `config` overrides the orchestrator's configuration for this call only.
    /// Returns `Err` only when the source file exceeds the size ceiling; any
    /// other failure yields a single `error` chunk.
    pub fn chunk_document(
        &self,
        document: &DocumentInput,
        strategy: &str,
        config: Option<&ChunkingConfig>,
    ) -> Result<Vec<Chunk>> {
        let effective_config = config.unwrap_or(&self.config);

        if let Err(e) = self.check_file_size(&document.file_identifier) {
            if e.is_fatal() {
                return Err(e);
            }
            return Ok(Self::recover(&document.file_identifier, Err(e)));
        }

        let kind = self.resolve_strategy(strategy, document);
        let result = self
            .strategy(kind)
            .chunk(document, effective_config)
            .map(|mut chunks| {
                annotate(&mut chunks, document, effective_config);
                chunks
            });

        let chunks = Self::recover(&document.file_identifier, result);
        log::info!(
            "Chunked {} into {} chunks ({} strategy)",
            document.file_identifier,
            chunks.len(),
            kind
        );
        Ok(chunks)
    }

    /// Collapse a failed chunking run into the sentinel error chunk
    pub fn recover(file_identifier: &str, result: Result<Vec<Chunk>>) -> Vec<Chunk> {
        match result {
            Ok(chunks) => chunks,
            Err(e) => {
                log::error!("Error chunking document {}: {}", file_identifier, e);
                vec![Chunk::error(file_identifier, &e.to_string())]
            }
        }
    }

    fn check_file_size(&self, file_identifier: &str) -> Result<()> {
        let Some(limit_mb) = self.max_file_size_mb else {
            return Ok(());
        };

        let size_mb = file_size_mb(file_identifier)?;
        if size_mb > limit_mb {
            return Err(ChunkingError::SizeLimitExceeded {
                path: file_identifier.to_string(),
                size_mb,
                limit_mb,
            });
        }
        Ok(())
    }
}

/// Stamp document-level provenance onto every chunk
fn annotate(chunks: &mut [Chunk], document: &DocumentInput, config: &ChunkingConfig) {
    let total_chunks = chunks.len();
    let source_length = char_len(&document.markdown);

    for chunk in chunks.iter_mut() {
        chunk.metadata.file_path = Some(document.file_identifier.clone());
        chunk.metadata.total_chunks = Some(total_chunks);
        chunk.metadata.source_length = Some(source_length);
        chunk.metadata.chunking_config = Some(config.clone());
    }
}
