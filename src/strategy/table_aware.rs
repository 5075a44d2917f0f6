//! Table and figure aware strategy
//!
//! Tables and figures become standalone chunks. The text around them is
//! packed like any other content block.

use super::{ChunkingStrategy, StrategyKind};
use crate::config::ChunkingConfig;
use crate::document::DocumentInput;
use crate::error::Result;
use crate::text::{Segment, detect_structured_elements};

#[derive(Debug, Default)]
pub struct TableAwareStrategy;

impl TableAwareStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for TableAwareStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TableAware
    }

    fn detect(&self, document: &DocumentInput, _config: &ChunkingConfig) -> Result<Vec<Segment>> {
        Ok(detect_structured_elements(&document.markdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ChunkKind;

    #[test]
    fn test_table_figure_and_text() {
        let markdown = "Revenue summary\n\n| Year | Revenue |\n|------|---------|\n| 2023 | 10 |\n| 2024 | 12 |\n\n![Growth chart](growth.png)\nClosing notes.";
        let document = DocumentInput::new("report.md", markdown);
        let chunks = TableAwareStrategy::new()
            .chunk(&document, &ChunkingConfig::default())
            .unwrap();

        let kinds: Vec<ChunkKind> = chunks.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChunkKind::ContentBlock,
                ChunkKind::Table,
                ChunkKind::Figure,
                ChunkKind::ContentBlock,
            ]
        );
        assert_eq!(chunks[1].content.lines().count(), 4);
        assert_eq!(chunks[2].content, "![Growth chart](growth.png)");
        assert_eq!(chunks[2].metadata.element_type, Some(ChunkKind::Figure));
        assert_eq!(chunks[3].content, "Closing notes.");
        assert!(chunks.iter().all(|c| c.metadata.strategy == Some(StrategyKind::TableAware)));
    }

    #[test]
    fn test_oversized_table_kept_whole() {
        let rows = "| cell | value |\n".repeat(40);
        let document = DocumentInput::new("t.md", rows.clone());
        let config = ChunkingConfig::new(100, 10, 10).unwrap();
        let chunks = TableAwareStrategy::new().chunk(&document, &config).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::Table);
        assert_eq!(chunks[0].content, rows.trim());
    }

    #[test]
    fn test_long_text_is_packed() {
        let text = format!("{}\n\n{}", "a".repeat(80), "b".repeat(80));
        let document = DocumentInput::new("t.md", text);
        let config = ChunkingConfig::new(100, 10, 0).unwrap();
        let chunks = TableAwareStrategy::new().chunk(&document, &config).unwrap();

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.kind == ChunkKind::ContentBlockPartial));
    }
}
