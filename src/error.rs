//! Typed errors raised by the vocabulary and configuration layers.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the omics reference tables.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("reference table '{table}' not found at {}", .path.display())]
    MissingTable { table: &'static str, path: PathBuf },
    #[error("reference table '{table}' is missing expected column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("reference table '{table}' could not be parsed: {source}")]
    Malformed {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
}

/// Invalid runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no proteome file configured; pass --proteome or set PROTEOME_FILE")]
    MissingProteome,
    #[error("{name} must be greater than zero")]
    NonPositive { name: &'static str },
    #[error("could not parse {name}={value:?}")]
    Unparsable { name: &'static str, value: String },
}
