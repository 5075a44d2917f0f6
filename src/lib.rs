//! # docling-chunker
//!
//! Structure-aware chunking of documents that an extraction engine has
//! already converted to markdown. Chunks are bounded in size, keep tables and
//! figures intact, and carry provenance for retrieval and embedding pipelines.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docling_chunker::{ChunkingConfig, ChunkingOrchestrator, DocumentInput};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = ChunkingOrchestrator::new(ChunkingConfig::with_sizes(1500, 150)?)?;
//!
//!     let markdown = std::fs::read_to_string("report.md")?;
//!     let document = DocumentInput::new("report.pdf", markdown).with_page_count(12);
//!
//!     let chunks = orchestrator.chunk_document(&document, "auto", None)?;
//!     for chunk in &chunks {
//!         println!("{} [{}] {} tokens", chunk.id, chunk.kind, chunk.token_count.unwrap_or(0));
//!     }
//!
//!     docling_chunker::save_chunks_to_json(&chunks, "chunks.json", true)?;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod strategy;
pub mod text;
pub mod utils;

// Re-export main API types
pub use api::{ChunkExport, ChunkingOrchestrator, ChunkingStats, chunks_to_json, save_chunks_to_json};
pub use config::{ChunkingConfig, TokenEstimation};
pub use document::{ClassificationHint, DocumentInput};
pub use error::{ChunkingError, Result};

// Re-export commonly used types
pub use strategy::{ChunkingStrategy, StrategyKind, select_strategy};
pub use text::{Chunk, ChunkKind, ChunkMetadata};
