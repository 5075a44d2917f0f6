//! Integration tests for the chunking pipeline
//!
//! Drives the public API end to end: strategy selection, packing bounds,
//! overlap, determinism and the error-chunk contract.

use docling_chunker::text::ERROR_CHUNK_ID;
use docling_chunker::{
    ChunkKind, ChunkingConfig, ChunkingError, ChunkingOrchestrator, ClassificationHint,
    DocumentInput, StrategyKind,
};

fn report_markdown() -> String {
    let mut markdown = String::from("Preamble before any header.\n\n");
    for section in 1..=6 {
        markdown.push_str(&format!("## Section {}\n\n", section));
        for paragraph in 0..4 {
            markdown.push_str(&format!(
                "Paragraph {} of section {} discusses findings in detail. {}\n\n",
                paragraph,
                section,
                "More supporting text follows here. ".repeat(6)
            ));
        }
    }
    markdown.push_str("| Metric | Value |\n|--------|-------|\n| Recall | 0.91 |\n\n");
    markdown.push_str("![Figure 1](figure1.png)\n\nClosing remarks.\n");
    markdown
}

#[test]
fn test_title_and_short_body() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let orchestrator = ChunkingOrchestrator::with_default_config()?;
    let document = DocumentInput::new("title.md", "# Title\n\nShort body.");
    let chunks = orchestrator.chunk_document(&document, "auto", None)?;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].kind, ChunkKind::Section);
    assert_eq!(chunks[0].metadata.section_title.as_deref(), Some("Title"));
    assert_eq!(chunks[0].metadata.strategy, Some(StrategyKind::Structural));
    Ok(())
}

#[test]
fn test_table_rows_select_table_aware() -> Result<(), Box<dyn std::error::Error>> {
    let mut markdown = String::from("Quarterly figures:\n\n| Quarter | Revenue | Cost |\n");
    for row in 0..14 {
        markdown.push_str(&format!("| Q{} | {} | {} |\n", row, row * 10, row * 7));
    }
    markdown.push_str("\nEnd of report.");

    let orchestrator = ChunkingOrchestrator::with_default_config()?;
    let document = DocumentInput::new("table.md", markdown);
    let chunks = orchestrator.chunk_document(&document, "auto", None)?;

    assert!(chunks.iter().all(|c| c.metadata.strategy == Some(StrategyKind::TableAware)));
    let tables: Vec<_> = chunks.iter().filter(|c| c.kind == ChunkKind::Table).collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].content.lines().count(), 15);
    Ok(())
}

#[test]
fn test_long_paragraph_overlap() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChunkingConfig::new(2000, 300, 200)?;
    let orchestrator = ChunkingOrchestrator::new(config)?;
    let paragraph = "abcdefghij".repeat(500);
    let document = DocumentInput::new("long.md", paragraph);
    let chunks = orchestrator.chunk_document(&document, "structural", None)?;

    assert_eq!(chunks.len(), 3);
    for pair in chunks.windows(2) {
        let previous: Vec<char> = pair[0].content.chars().collect();
        let tail: String = previous[previous.len() - 200..].iter().collect();
        let head: String = pair[1].content.chars().take(200).collect();
        assert_eq!(head, tail);
    }
    assert!(chunks.iter().all(|c| c.kind == ChunkKind::ContentBlockPartial));
    Ok(())
}

#[test]
fn test_unknown_strategy_matches_structural() -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = ChunkingOrchestrator::with_default_config()?;
    let document = DocumentInput::new("report.md", report_markdown());

    let bogus = orchestrator.chunk_document(&document, "bogus", None)?;
    let structural = orchestrator.chunk_document(&document, "structural", None)?;

    assert_eq!(bogus, structural);
    assert!(!bogus.iter().any(|c| c.is_error()));
    Ok(())
}

#[test]
fn test_detection_failure_yields_error_chunk() -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = ChunkingOrchestrator::with_default_config()?;
    let document = DocumentInput::new("binary.pdf", "%PDF-1.7\0\0stream");
    let chunks = orchestrator.chunk_document(&document, "auto", None)?;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].id, ERROR_CHUNK_ID);
    assert_eq!(chunks[0].kind, ChunkKind::Error);
    let message = chunks[0].metadata.error.clone().unwrap_or_default();
    assert!(chunks[0].content.ends_with(&message));

    let json = serde_json::to_value(&chunks[0])?;
    assert_eq!(json["chunk_id"], "error_chunk");
    assert_eq!(json["chunk_type"], "error");
    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() {
    assert!(matches!(
        ChunkingConfig::new(500, 500, 10),
        Err(ChunkingError::Config(_))
    ));
    assert!(matches!(
        ChunkingConfig::new(500, 100, 500),
        Err(ChunkingError::Config(_))
    ));
}

#[test]
fn test_idempotent_chunking() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChunkingConfig::new(400, 50, 40)?;
    let orchestrator = ChunkingOrchestrator::new(config)?;
    let document = DocumentInput::new("report.md", report_markdown());

    for strategy in ["structural", "table_aware", "page_aware"] {
        let first = orchestrator.chunk_document(&document, strategy, None)?;
        let second = orchestrator.chunk_document(&document, strategy, None)?;
        assert_eq!(first, second);
    }
    Ok(())
}

#[test]
fn test_size_bound_holds() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChunkingConfig::new(300, 50, 60)?;
    let orchestrator = ChunkingOrchestrator::new(config)?;
    let document = DocumentInput::new("report.pdf", report_markdown()).with_page_count(3);

    for strategy in ["structural", "table_aware", "page_aware"] {
        let chunks = orchestrator.chunk_document(&document, strategy, None)?;
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            let atomic = matches!(chunk.kind, ChunkKind::Table | ChunkKind::Figure);
            assert!(
                atomic || chunk.content.chars().count() <= 300,
                "{} chunk {} has {} chars",
                strategy,
                chunk.id,
                chunk.content.chars().count()
            );
        }
    }
    Ok(())
}

#[test]
fn test_no_content_lost() -> Result<(), Box<dyn std::error::Error>> {
    let markdown = report_markdown();
    let orchestrator = ChunkingOrchestrator::new(ChunkingConfig::new(350, 50, 0)?)?;
    let document = DocumentInput::new("report.md", markdown.clone());

    for strategy in ["structural", "table_aware"] {
        let chunks = orchestrator.chunk_document(&document, strategy, None)?;
        let joined: String = chunks.iter().map(|c| c.content.as_str()).collect::<Vec<_>>().join(" ");
        for word in markdown.split_whitespace() {
            assert!(joined.contains(word), "{} lost {:?}", strategy, word);
        }

        let source_chars = markdown.chars().filter(|c| !c.is_whitespace()).count();
        let chunk_chars: usize = chunks
            .iter()
            .map(|c| c.content.chars().filter(|ch| !ch.is_whitespace()).count())
            .sum();
        assert_eq!(chunk_chars, source_chars);
    }
    Ok(())
}

#[test]
fn test_pdf_with_pages_selects_page_aware() -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = ChunkingOrchestrator::with_default_config()?;
    let markdown = (1..=6)
        .map(|i| format!("# Chapter {}\n\n{}", i, "Chapter text. ".repeat(30)))
        .collect::<Vec<_>>()
        .join("\n\n");
    let document = DocumentInput::new("book.pdf", markdown)
        .with_page_count(3)
        .with_classification(ClassificationHint::new("PDF Document", 0.95));

    let chunks = orchestrator.chunk_document(&document, "auto", None)?;
    assert!(chunks.iter().all(|c| c.metadata.strategy == Some(StrategyKind::PageAware)));
    assert!(chunks.iter().all(|c| c.kind == ChunkKind::PageSection));
    assert_eq!(chunks.first().and_then(|c| c.metadata.approximate_page), Some(1));
    Ok(())
}

#[test]
fn test_chunk_ids_unique() -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = ChunkingOrchestrator::new(ChunkingConfig::new(300, 50, 30)?)?;
    let document = DocumentInput::new("report.md", report_markdown());
    let chunks = orchestrator.chunk_document(&document, "table_aware", None)?;

    let mut ids: Vec<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(chunk.id.starts_with(&format!("chunk_{}_", i)));
        assert_eq!(chunk.metadata.total_chunks, Some(chunks.len()));
    }
    Ok(())
}
