//! Markdown segmentation and chunk packing for docling-chunker
//!
//! This module provides the boundary detectors, the size-bounded packer and
//! the chunk records they produce.

pub mod boundary;
pub mod chunk;
pub mod packing;

// Re-export main types and functions
pub use boundary::{Segment, SegmentKind, SectionDetector, detect_pages, detect_structured_elements};
pub use chunk::{Chunk, ChunkKind, ChunkMetadata, ERROR_CHUNK_ID, chunk_id};
pub use packing::ChunkPacker;
