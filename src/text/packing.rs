//! Size-bounded packing of segments into chunks
//!
//! A segment that fits within `max_chunk_size` becomes one chunk. Larger
//! segments are re-split at blank lines and the paragraphs are accumulated
//! greedily; each emitted piece seeds the next with its trailing
//! `overlap_size` characters. A paragraph that alone exceeds the bound is cut
//! at character boundaries with the same overlap. Tables and figures are
//! always emitted whole.

use crate::config::ChunkingConfig;
use crate::strategy::StrategyKind;
use crate::text::boundary::{Segment, SegmentKind};
use crate::text::chunk::{Chunk, ChunkKind, ChunkMetadata, chunk_id};
use crate::utils::{char_len, split_at_char, tail_chars};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Accumulates chunks for one document, assigning ordinals in emission order
pub struct ChunkPacker<'a> {
    config: &'a ChunkingConfig,
    strategy: StrategyKind,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkPacker<'a> {
    pub fn new(config: &'a ChunkingConfig, strategy: StrategyKind) -> Self {
        Self {
            config,
            strategy,
            chunks: Vec::new(),
        }
    }

    /// Pack a full segment sequence
    pub fn pack(mut self, segments: &[Segment]) -> Vec<Chunk> {
        for segment in segments {
            self.push_segment(segment);
        }
        self.finish()
    }

    pub fn push_segment(&mut self, segment: &Segment) {
        let content = segment.text.trim();
        if content.is_empty() {
            return;
        }

        if segment.kind.is_atomic() || char_len(content) <= self.config.max_chunk_size() {
            self.emit(content, segment, false);
        } else {
            self.split_segment(segment);
        }
    }

    pub fn finish(self) -> Vec<Chunk> {
        self.chunks
    }

    fn split_segment(&mut self, segment: &Segment) {
        let max = self.config.max_chunk_size();
        let separator_len = char_len(PARAGRAPH_SEPARATOR);
        let mut buffer = String::new();

        let paragraphs = segment
            .text
            .split(PARAGRAPH_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty());

        for paragraph in paragraphs {
            if buffer.is_empty() {
                buffer.push_str(paragraph);
            } else if char_len(&buffer) + separator_len + char_len(paragraph) > max {
                let carried = self.emit_partial(&buffer, segment);
                buffer = if carried.is_empty() {
                    paragraph.to_string()
                } else {
                    format!("{}{}{}", carried, PARAGRAPH_SEPARATOR, paragraph)
                };
            } else {
                buffer.push_str(PARAGRAPH_SEPARATOR);
                buffer.push_str(paragraph);
            }

            // A single paragraph can still exceed the bound
            while char_len(&buffer) > max {
                let (head, rest) = buffer.split_at(cut_offset(&buffer, max, self.config.overlap_size()));
                let carried = self.emit_partial(head, segment);
                let next = join_overlap(&carried, head, rest);
                // The overlap must never stall the cut
                buffer = if char_len(&next) < char_len(&buffer) {
                    next
                } else {
                    rest.trim_start().to_string()
                };
            }
        }

        if !buffer.trim().is_empty() {
            self.emit_partial(&buffer, segment);
        }
    }

    /// Emit one piece of a split segment and return the overlap to carry forward
    fn emit_partial(&mut self, text: &str, segment: &Segment) -> String {
        let content = text.trim();
        if content.is_empty() {
            return String::new();
        }
        self.emit(content, segment, true);
        tail_chars(content, self.config.overlap_size())
            .trim_start()
            .to_string()
    }

    fn emit(&mut self, content: &str, segment: &Segment, partial: bool) {
        let index = self.chunks.len();
        let whole_kind = match segment.kind {
            SegmentKind::Section => ChunkKind::Section,
            SegmentKind::ContentBlock => ChunkKind::ContentBlock,
            SegmentKind::Table => ChunkKind::Table,
            SegmentKind::Figure => ChunkKind::Figure,
            SegmentKind::PageSection => ChunkKind::PageSection,
        };
        let kind = if partial { whole_kind.partial() } else { whole_kind };

        if !segment.kind.is_atomic() && char_len(content) < self.config.min_chunk_size() {
            log::trace!(
                "Chunk {} is below the advisory minimum ({} < {})",
                index,
                char_len(content),
                self.config.min_chunk_size()
            );
        }

        let metadata = ChunkMetadata {
            strategy: Some(self.strategy),
            chunk_index: Some(index),
            section_title: segment.title.clone(),
            section_level: segment.level,
            is_partial: partial.then_some(true),
            element_type: segment.kind.is_atomic().then_some(whole_kind),
            approximate_page: segment.page,
            ..ChunkMetadata::default()
        };

        self.chunks.push(Chunk {
            id: chunk_id(content, index),
            content: content.to_string(),
            kind,
            metadata,
            start_position: None,
            end_position: None,
            token_count: Some(self.config.estimate_tokens(content)),
        });
    }
}

/// Byte offset at which to cut `text` so the head holds at most `max`
/// characters. Prefers the last whitespace that leaves more than `min_head`
/// characters in the trimmed head; otherwise cuts at exactly `max` characters.
fn cut_offset(text: &str, max: usize, min_head: usize) -> usize {
    let hard = split_at_char(text, max).0.len();
    let breaks: Vec<usize> = text
        .char_indices()
        .take(max + 1)
        .skip(1)
        .filter(|(_, ch)| ch.is_whitespace())
        .map(|(idx, _)| idx)
        .collect();

    breaks
        .into_iter()
        .rev()
        .find(|&idx| char_len(text[..idx].trim()) > min_head)
        .unwrap_or(hard)
}

/// Seed the next piece with the carried overlap, keeping one whitespace
/// character where the cut fell between words.
fn join_overlap(carried: &str, head: &str, rest: &str) -> String {
    let body = rest.trim_start();
    if body.is_empty() {
        return String::new();
    }
    if carried.is_empty() {
        return body.to_string();
    }

    let separator = rest
        .chars()
        .next()
        .filter(|c| c.is_whitespace())
        .or_else(|| head.chars().last().filter(|c| c.is_whitespace()));
    match separator {
        Some(sep) => format!("{}{}{}", carried, sep, body),
        None => format!("{}{}", carried, body),
    }
}
