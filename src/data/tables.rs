//! Delimited-file readers and writers for pipeline outputs.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use tracing::info;

use crate::{data::synonyms::MappedSynonym, nlp::pairs::SentenceMatch};

pub const PAIRS_FILE: &str = "sentence_biomolecule_pairs.csv";
pub const SYNONYM_TABLE_FILE: &str = "synonym_table.txt";
pub const VOCABULARY_FILE: &str = "vocabulary.txt";

/// Write extracted pairs as comma-delimited rows.
pub fn write_pairs(path: &Path, rows: &[SentenceMatch]) -> Result<()> {
    write_rows(path, b',', &SentenceMatch::COLUMNS, rows)?;
    info!(path = %path.display(), rows = rows.len(), "wrote sentence pairs");
    Ok(())
}

/// Read a pairs table produced by [`write_pairs`].
pub fn read_pairs(path: &Path) -> Result<Vec<SentenceMatch>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("open pairs table {}", path.display()))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: SentenceMatch =
            result.with_context(|| format!("parse pairs table {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write the `Synonym, ID, Type` table, tab-delimited.
pub fn write_synonym_table(path: &Path, rows: &[MappedSynonym]) -> Result<()> {
    write_rows(path, b'\t', &["Synonym", "ID", "Type"], rows)?;
    info!(path = %path.display(), rows = rows.len(), "wrote synonym table");
    Ok(())
}

/// Dump the matching vocabulary, one term per line under a `term` header.
pub fn write_vocabulary(path: &Path, terms: &[String]) -> Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        term: &'a str,
    }
    let rows: Vec<Row<'_>> = terms.iter().map(|term| Row { term }).collect();
    write_rows(path, b'\t', &["term"], &rows)?;
    info!(path = %path.display(), terms = terms.len(), "wrote vocabulary");
    Ok(())
}

/// Read a list of terms, one per line. A leading `term` header is skipped
/// and blank lines are ignored.
pub fn read_terms(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read terms file {}", path.display()))?;
    let mut lines = text.lines().map(str::trim).peekable();
    if lines.peek() == Some(&"term") {
        lines.next();
    }
    Ok(lines
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn write_rows<T: Serialize>(
    path: &Path,
    delimiter: u8,
    headers: &[&str],
    rows: &[T],
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Headers are written up front so empty tables still carry them.
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
