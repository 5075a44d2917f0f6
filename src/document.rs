//! Input records handed over by the extraction collaborator
//!
//! The chunker never sees binary document content. It receives the markdown
//! produced upstream, an optional page count and an optional classification.

use serde::{Deserialize, Serialize};

/// Document classification produced upstream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationHint {
    /// Detected type name, e.g. "PDF Document"
    pub type_name: String,

    /// Heuristic confidence in `0.0..=1.0`
    pub confidence: f32,
}

impl ClassificationHint {
    pub fn new(type_name: impl Into<String>, confidence: f32) -> Self {
        Self {
            type_name: type_name.into(),
            confidence,
        }
    }
}

/// Extracted document ready for chunking
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInput {
    /// Path or other identifier of the source file
    pub file_identifier: String,

    /// Markdown produced by the extraction engine
    pub markdown: String,

    /// Page count reported by the extraction engine
    pub page_count: Option<u32>,

    /// Optional document classification
    pub classification: Option<ClassificationHint>,
}

impl DocumentInput {
    pub fn new(file_identifier: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            file_identifier: file_identifier.into(),
            markdown: markdown.into(),
            page_count: None,
            classification: None,
        }
    }

    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }

    pub fn with_classification(mut self, classification: ClassificationHint) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Page count usable for page-based segmentation (at least one page)
    pub fn known_page_count(&self) -> Option<u32> {
        self.page_count.filter(|&pages| pages > 0)
    }
}
