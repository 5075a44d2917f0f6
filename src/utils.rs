//! Utility functions for docling-chunker
//!
//! File helpers used by the orchestrator and the CLI, and character-based
//! string slicing used by the packer. All sizes are counted in `char`s so
//! slicing never lands inside a multi-byte sequence.

use crate::error::Result;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Check if a file holds extracted markdown the chunker can read
pub fn is_supported_document<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}

/// Size of a file in megabytes, via filesystem stat
pub fn file_size_mb<P: AsRef<Path>>(path: P) -> Result<f64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.len() as f64 / BYTES_PER_MB)
}

/// Size of a written chunk export, in the units the size ceiling uses
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * KB;

    match bytes {
        b if b >= MB => format!("{:.2} MB", b as f64 / BYTES_PER_MB),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

/// File stem of an input document, reduced to characters safe in an output
/// file name
pub fn output_stem<P: AsRef<Path>>(input: P) -> String {
    let stem: String = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();

    if stem.trim_matches('_').is_empty() {
        "document".to_string()
    } else {
        stem
    }
}

/// Length of `text` in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The trailing `n` characters of `text`
pub fn tail_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Split `text` after its first `n` characters
pub fn split_at_char(text: &str, n: usize) -> (&str, &str) {
    match text.char_indices().nth(n) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}
