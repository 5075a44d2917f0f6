//! API layer for docling-chunker
//!
//! This module provides the orchestrator that callers chunk documents with,
//! and the JSON export of its results.

pub mod export;
pub mod orchestrator;

// Re-export main API types
pub use export::{ChunkExport, ChunkingStats, chunks_to_json, save_chunks_to_json};
pub use orchestrator::ChunkingOrchestrator;
