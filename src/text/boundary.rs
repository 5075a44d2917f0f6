//! Boundary detection over extracted markdown
//!
//! Each detector partitions the text into ordered segments by one kind of
//! structural cue. Segments are transient and go straight to the packer.

use crate::error::{ChunkingError, Result};
use crate::utils::char_len;
use regex::Regex;

/// Kind of content a segment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Text opened by a markdown header
    Section,
    /// Plain text outside any recognised structure
    ContentBlock,
    /// Contiguous run of pipe-delimited rows
    Table,
    /// Single image reference line
    Figure,
    /// Slice of roughly one page worth of text
    PageSection,
}

impl SegmentKind {
    /// Tables and figures are never split, whatever their size
    pub fn is_atomic(&self) -> bool {
        matches!(self, SegmentKind::Table | SegmentKind::Figure)
    }
}

/// A structural segment of markdown
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub title: Option<String>,
    pub level: Option<u8>,
    pub page: Option<usize>,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            level: None,
            page: None,
            text: text.into(),
        }
    }

    fn section(title: String, level: u8, text: String) -> Self {
        Self {
            kind: SegmentKind::Section,
            title: Some(title),
            level: Some(level),
            page: None,
            text,
        }
    }

    fn page(number: usize, text: String) -> Self {
        Self {
            page: Some(number),
            ..Self::new(SegmentKind::PageSection, text)
        }
    }

    fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Reject text that cannot be extracted markdown
pub fn validate_markdown(text: &str) -> Result<()> {
    if let Some(position) = text.find('\0') {
        return Err(ChunkingError::MalformedInput(format!(
            "NUL byte at offset {} (binary content in markdown)",
            position
        )));
    }
    Ok(())
}

/// The whole text as one content block, used when structure is not preserved
pub fn whole_document(text: &str) -> Vec<Segment> {
    if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![Segment::new(SegmentKind::ContentBlock, text)]
    }
}

/// Header-based section detection
pub struct SectionDetector {
    header_regex: Regex,
}

impl SectionDetector {
    pub fn new() -> Result<Self> {
        let header_regex = Regex::new(r"^(#{1,6})\s+(\S.*)$").map_err(|e| {
            ChunkingError::TextProcessing(format!("Failed to compile header regex: {}", e))
        })?;

        Ok(Self { header_regex })
    }

    /// Split text into sections opened by `#`..`######` headers
    ///
    /// Text before the first header becomes an untitled content block.
    /// Sections holding only whitespace are dropped.
    pub fn detect(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current = Segment::new(SegmentKind::ContentBlock, String::new());

        for line in text.split('\n') {
            if let Some(caps) = self.header_regex.captures(line) {
                let level = caps[1].len() as u8;
                let title = caps[2].trim().to_string();

                let finished = std::mem::replace(
                    &mut current,
                    Segment::section(title, level, format!("{}\n", line)),
                );
                if finished.has_content() {
                    segments.push(finished);
                }
            } else {
                current.text.push_str(line);
                current.text.push('\n');
            }
        }

        if current.has_content() {
            segments.push(current);
        }

        segments
    }
}

/// Table and figure aware detection
///
/// A line with two or more `|` is a table row, a line starting with `![` is
/// a standalone figure, anything else is content. Runs of the same kind form
/// one segment.
pub fn detect_structured_elements(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = Segment::new(SegmentKind::ContentBlock, String::new());

    for line in text.split('\n') {
        if line.matches('|').count() >= 2 {
            if current.kind != SegmentKind::Table {
                flush(&mut segments, &mut current, SegmentKind::Table);
            }
            current.text.push_str(line);
            current.text.push('\n');
        } else if line.starts_with("![") {
            flush(&mut segments, &mut current, SegmentKind::ContentBlock);
            segments.push(Segment::new(SegmentKind::Figure, line));
        } else {
            if current.kind != SegmentKind::ContentBlock {
                flush(&mut segments, &mut current, SegmentKind::ContentBlock);
            }
            current.text.push_str(line);
            current.text.push('\n');
        }
    }

    if current.has_content() {
        segments.push(current);
    }

    segments
}

fn flush(segments: &mut Vec<Segment>, current: &mut Segment, next: SegmentKind) {
    let finished = std::mem::replace(current, Segment::new(next, String::new()));
    if finished.has_content() {
        segments.push(finished);
    }
}

/// Page-based detection
///
/// Splits the text into slices of about `total_length / page_count`
/// characters at line boundaries, ignoring structural cues.
pub fn detect_pages(text: &str, page_count: u32) -> Vec<Segment> {
    let total_length = char_len(text);
    let page_budget = if page_count >= 1 {
        total_length / page_count as usize
    } else {
        total_length
    };

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_size = 0;

    for line in text.split('\n') {
        let line_len = char_len(line);

        if current_size + line_len > page_budget && !current.trim().is_empty() {
            let number = segments.len() + 1;
            segments.push(Segment::page(number, std::mem::take(&mut current)));
            current_size = 0;
        }

        current.push_str(line);
        current.push('\n');
        current_size += line_len;
    }

    if !current.trim().is_empty() {
        let number = segments.len() + 1;
        segments.push(Segment::page(number, current));
    }

    log::debug!(
        "Page detection: {} chars over {} pages (budget {}) -> {} segments",
        total_length,
        page_count,
        page_budget,
        segments.len()
    );

    segments
}
