//! JSON export of chunk sequences for downstream AI/ML consumers

use crate::error::Result;
use crate::text::{Chunk, ChunkKind, ChunkMetadata};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Framework name written into exports
pub const FRAMEWORK_NAME: &str = env!("CARGO_PKG_NAME");

/// Framework version written into exports
pub const FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exported document: `{total_chunks, framework, version, chunks}`
#[derive(Debug, Serialize)]
pub struct ChunkExport<'a> {
    pub total_chunks: usize,
    pub framework: &'static str,
    pub version: &'static str,
    pub chunks: Vec<ExportedChunk<'a>>,
}

/// One chunk as it appears in an export
#[derive(Debug, Serialize)]
pub struct ExportedChunk<'a> {
    pub chunk_id: &'a str,
    pub content: &'a str,
    pub chunk_type: ChunkKind,
    pub token_count: Option<usize>,
    pub start_position: Option<usize>,
    pub end_position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a ChunkMetadata>,
}

impl<'a> ChunkExport<'a> {
    pub fn new(chunks: &'a [Chunk], include_metadata: bool) -> Self {
        let chunks: Vec<ExportedChunk<'a>> = chunks
            .iter()
            .map(|chunk| ExportedChunk {
                chunk_id: &chunk.id,
                content: &chunk.content,
                chunk_type: chunk.kind,
                token_count: chunk.token_count,
                start_position: chunk.start_position,
                end_position: chunk.end_position,
                metadata: include_metadata.then_some(&chunk.metadata),
            })
            .collect();

        Self {
            total_chunks: chunks.len(),
            framework: FRAMEWORK_NAME,
            version: FRAMEWORK_VERSION,
            chunks,
        }
    }
}

/// Render chunks as a pretty-printed JSON export
pub fn chunks_to_json(chunks: &[Chunk], include_metadata: bool) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ChunkExport::new(chunks, include_metadata))?)
}

/// Save chunks to a JSON file
pub fn save_chunks_to_json<P: AsRef<Path>>(
    chunks: &[Chunk],
    output_path: P,
    include_metadata: bool,
) -> Result<()> {
    let json = chunks_to_json(chunks, include_metadata)?;
    std::fs::write(output_path.as_ref(), json)?;
    log::info!(
        "Saved {} chunks to {}",
        chunks.len(),
        output_path.as_ref().display()
    );
    Ok(())
}

/// Summary of a chunking run
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_tokens: usize,
    pub total_characters: usize,
    pub failed: bool,
    pub kinds: BTreeMap<ChunkKind, usize>,
}

impl ChunkingStats {
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        let mut stats = Self {
            total_chunks: chunks.len(),
            ..Self::default()
        };

        for chunk in chunks {
            stats.total_tokens += chunk.token_count.unwrap_or(0);
            stats.total_characters += chunk.content.chars().count();
            stats.failed |= chunk.is_error();
            *stats.kinds.entry(chunk.kind).or_insert(0) += 1;
        }

        stats
    }
}
