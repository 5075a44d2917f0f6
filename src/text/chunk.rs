//! Chunk records returned to callers

use crate::config::ChunkingConfig;
use crate::strategy::StrategyKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the sentinel chunk returned when chunking fails
pub const ERROR_CHUNK_ID: &str = "error_chunk";

/// Kind of content a chunk carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkKind {
    Section,
    SectionPartial,
    ContentBlock,
    ContentBlockPartial,
    Table,
    Figure,
    PageSection,
    PageSectionPartial,
    Error,
}

impl ChunkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkKind::Section => "section",
            ChunkKind::SectionPartial => "section-partial",
            ChunkKind::ContentBlock => "content-block",
            ChunkKind::ContentBlockPartial => "content-block-partial",
            ChunkKind::Table => "table",
            ChunkKind::Figure => "figure",
            ChunkKind::PageSection => "page-section",
            ChunkKind::PageSectionPartial => "page-section-partial",
            ChunkKind::Error => "error",
        }
    }

    /// Kind of a piece cut from an oversized chunk of this kind
    pub fn partial(self) -> Self {
        match self {
            ChunkKind::Section => ChunkKind::SectionPartial,
            ChunkKind::ContentBlock => ChunkKind::ContentBlockPartial,
            ChunkKind::PageSection => ChunkKind::PageSectionPartial,
            other => other,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            ChunkKind::SectionPartial | ChunkKind::ContentBlockPartial | ChunkKind::PageSectionPartial
        )
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance attached to a chunk
///
/// Strategy fields are set when the chunk is produced, document fields are
/// stamped by the orchestrator once the whole sequence exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_level: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_partial: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<ChunkKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approximate_page: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_chunks: Option<usize>,

    /// Length of the source markdown in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunking_config: Option<ChunkingConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A bounded segment of extracted markdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// `chunk_<ordinal>_<digest>`, or `error_chunk` for the failure sentinel
    #[serde(rename = "chunk_id")]
    pub id: String,

    pub content: String,

    #[serde(rename = "chunk_type")]
    pub kind: ChunkKind,

    pub metadata: ChunkMetadata,

    /// Reserved for offset tracking
    pub start_position: Option<usize>,

    /// Reserved for offset tracking
    pub end_position: Option<usize>,

    pub token_count: Option<usize>,
}

impl Chunk {
    pub fn is_error(&self) -> bool {
        self.kind == ChunkKind::Error
    }

    /// Sentinel chunk standing in for a failed chunking run
    pub fn error(file_identifier: &str, message: &str) -> Self {
        Self {
            id: ERROR_CHUNK_ID.to_string(),
            content: format!("Error chunking document: {}", message),
            kind: ChunkKind::Error,
            metadata: ChunkMetadata {
                error: Some(message.to_string()),
                file_path: Some(file_identifier.to_string()),
                ..ChunkMetadata::default()
            },
            start_position: None,
            end_position: None,
            token_count: None,
        }
    }
}

/// Deterministic chunk identifier from ordinal and content digest
pub fn chunk_id(content: &str, index: usize) -> String {
    let digest = format!("{:x}", md5::compute(content.as_bytes()));
    format!("chunk_{}_{}", index, &digest[..8])
}
