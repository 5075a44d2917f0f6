//! docling-chunker CLI application
//!
//! Command-line interface for the docling-chunker library.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docling_chunker::utils::{format_file_size, is_supported_document, output_stem};
use docling_chunker::{
    ChunkingConfig, ChunkingOrchestrator, ChunkingStats, ClassificationHint, DocumentInput,
    save_chunks_to_json, select_strategy,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docling-chunker")]
#[command(about = "Structure-aware chunking of extracted document markdown")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk extracted markdown files
    Chunk {
        /// Markdown file(s) to chunk
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Strategy: auto, structural, table_aware or page_aware
        #[arg(short, long, default_value = "auto")]
        strategy: String,

        /// JSON configuration file (replaces the size flags)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum chunk size in characters
        #[arg(long, default_value = "2000", conflicts_with = "config")]
        max_chunk_size: usize,

        /// Advisory minimum chunk size in characters
        #[arg(long, default_value = "300", conflicts_with = "config")]
        min_chunk_size: usize,

        /// Overlap between split chunks in characters
        #[arg(long, default_value = "200", conflicts_with = "config")]
        overlap: usize,

        /// Pack the whole text without consulting structure
        #[arg(long)]
        no_structure: bool,

        /// Page count reported by the extraction engine
        #[arg(long)]
        pages: Option<u32>,

        /// Document type reported by the classifier, e.g. "PDF Document"
        #[arg(long)]
        doc_type: Option<String>,

        /// Refuse inputs larger than this many megabytes
        #[arg(long)]
        max_file_size_mb: Option<f64>,

        /// Output JSON file (suffixed per input when several inputs are given)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Omit chunk metadata from the JSON output
        #[arg(long)]
        no_metadata: bool,
    },

    /// Show which strategy auto-selection picks for a file
    Select {
        /// Markdown file to inspect
        input: PathBuf,

        /// Document type reported by the classifier
        #[arg(long)]
        doc_type: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chunk {
            inputs,
            strategy,
            config,
            max_chunk_size,
            min_chunk_size,
            overlap,
            no_structure,
            pages,
            doc_type,
            max_file_size_mb,
            output,
            no_metadata,
        } => {
            let chunking_config = match config {
                Some(path) => ChunkingConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load configuration {}", path.display()))?,
                None => ChunkingConfig::new(max_chunk_size, min_chunk_size, overlap)?,
            };
            let chunking_config = if no_structure {
                chunking_config.with_preserve_structure(false)
            } else {
                chunking_config
            };

            let mut orchestrator = ChunkingOrchestrator::new(chunking_config)?;
            if let Some(limit) = max_file_size_mb {
                orchestrator = orchestrator.with_max_file_size_mb(limit);
            }

            let options = ChunkOptions {
                strategy,
                pages,
                doc_type,
                output,
                include_metadata: !no_metadata,
            };
            chunk_command(&orchestrator, inputs, &options);
        }
        Commands::Select { input, doc_type } => {
            select_command(input, doc_type)?;
        }
    }

    Ok(())
}

struct ChunkOptions {
    strategy: String,
    pages: Option<u32>,
    doc_type: Option<String>,
    output: Option<PathBuf>,
    include_metadata: bool,
}

fn chunk_command(
    orchestrator: &ChunkingOrchestrator,
    inputs: Vec<PathBuf>,
    options: &ChunkOptions,
) {
    println!("✂️  Starting chunking...");

    let multiple = inputs.len() > 1;
    let mut processed = 0;

    for input in inputs {
        println!("📄 Processing: {}", input.display());

        if !input.exists() {
            eprintln!("❌ File not found: {}", input.display());
            continue;
        }
        if !is_supported_document(&input) {
            eprintln!("❌ Unsupported file type: {}", input.display());
            continue;
        }

        let markdown = match std::fs::read_to_string(&input) {
            Ok(markdown) => markdown,
            Err(e) => {
                eprintln!("❌ Failed to read {}: {}", input.display(), e);
                continue;
            }
        };

        let mut document = DocumentInput::new(input.to_string_lossy(), markdown);
        if let Some(pages) = options.pages {
            document = document.with_page_count(pages);
        }
        if let Some(doc_type) = &options.doc_type {
            document = document.with_classification(ClassificationHint::new(doc_type.clone(), 1.0));
        }

        let chunks = match orchestrator.chunk_document(&document, &options.strategy, None) {
            Ok(chunks) => chunks,
            Err(e) => {
                eprintln!("❌ Failed to chunk {}: {}", input.display(), e);
                continue;
            }
        };

        let stats = ChunkingStats::from_chunks(&chunks);
        if stats.failed {
            eprintln!("❌ Chunking failed: {}", chunks[0].content);
        } else {
            println!("   📊 Chunks: {}", stats.total_chunks);
            println!("   🔤 Estimated tokens: {}", stats.total_tokens);
            for (kind, count) in &stats.kinds {
                println!("      {}: {}", kind, count);
            }
        }

        if let Some(output) = &options.output {
            let path = if multiple {
                output_for(output, &input)
            } else {
                output.clone()
            };
            if let Err(e) = save_chunks_to_json(&chunks, &path, options.include_metadata) {
                eprintln!("❌ Failed to write {}: {}", path.display(), e);
                continue;
            }
            let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            println!("   💾 Saved: {} ({})", path.display(), format_file_size(size));
        }

        processed += 1;
    }

    if processed == 0 {
        eprintln!("❌ No content was successfully processed");
        return;
    }

    println!("✅ Chunking complete! {} file(s) processed", processed);
}

fn select_command(input: PathBuf, doc_type: Option<String>) -> anyhow::Result<()> {
    let markdown = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let hint = doc_type.map(|t| ClassificationHint::new(t, 1.0));
    let kind = select_strategy(&markdown, hint.as_ref());

    println!("🔍 {}: {}", input.display(), kind);
    Ok(())
}

/// `out.json` + `docs/report.md` -> `out.report.json`
fn output_for(output: &Path, input: &Path) -> PathBuf {
    let stem = output_stem(input);
    let base = output
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "chunks".to_string());
    output.with_file_name(format!("{}.{}.json", base, stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["docling-chunker", "chunk", "report.md"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from([
            "docling-chunker",
            "chunk",
            "a.md",
            "b.md",
            "--strategy",
            "table_aware",
            "--pages",
            "3",
            "--output",
            "out.json",
        ]);
        assert!(cli.is_ok());

        assert!(Cli::try_parse_from(["docling-chunker", "chunk"]).is_err());
    }

    #[test]
    fn test_config_file_conflicts_with_size_flags() {
        let cli = Cli::try_parse_from([
            "docling-chunker",
            "chunk",
            "a.md",
            "--config",
            "chunking.json",
            "--overlap",
            "50",
        ]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "docling-chunker",
            "chunk",
            "a.md",
            "--config",
            "chunking.json",
            "--no-structure",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_failed_write_does_not_stop_remaining_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.md");
        let second = dir.path().join("second.md");
        std::fs::write(&first, "# First\n\nBody.").unwrap();
        std::fs::write(&second, "# Second\n\nBody.").unwrap();

        // Occupy the first output path with a directory so its write fails
        let output = dir.path().join("out.json");
        std::fs::create_dir(output_for(&output, &first)).unwrap();

        let orchestrator = ChunkingOrchestrator::with_default_config().unwrap();
        let options = ChunkOptions {
            strategy: "auto".to_string(),
            pages: None,
            doc_type: None,
            output: Some(output.clone()),
            include_metadata: true,
        };
        chunk_command(&orchestrator, vec![first, second.clone()], &options);

        let written = std::fs::read_to_string(output_for(&output, &second)).unwrap();
        assert!(written.contains("\"total_chunks\": 1"));
    }

    #[test]
    fn test_output_naming() {
        let path = output_for(Path::new("out/chunks.json"), Path::new("docs/report.md"));
        assert_eq!(path, PathBuf::from("out/chunks.report.json"));
    }
}
