//! Loading of the omics reference tables (lipidome, metabolome, proteome).

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{data::normalize::normalize, error::VocabularyError};

pub const LIPIDOME_FILE: &str = "LipidMaps_Lipidome.csv";
pub const METABOLOME_FILE: &str = "CHEBI_Metabolome.txt";
pub const STOP_WORDS_FILE: &str = "stop_words_english.txt";

const SYNONYMS_COLUMN: &str = "Synonyms";
const STOP_WORDS_COLUMN: &str = "stopwords";
const SYNONYM_DELIMITER: &str = "; ";
const PLACEHOLDERS: &[&str] = &["", "nan"];

/// Biomolecule class a synonym resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Molecule {
    #[serde(rename = "lipid")]
    Lipid,
    #[serde(rename = "metabolite")]
    Metabolite,
    #[serde(rename = "gene product")]
    GeneProduct,
}

impl Molecule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lipid => "lipid",
            Self::Metabolite => "metabolite",
            Self::GeneProduct => "gene product",
        }
    }
}

/// One of the three reference vocabularies, listed in resolution priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OmeSource {
    Lipidome,
    Metabolome,
    Proteome,
}

impl OmeSource {
    /// Sources in the order synonyms are resolved against them.
    pub const PRIORITY: [OmeSource; 3] = [Self::Lipidome, Self::Metabolome, Self::Proteome];

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Lipidome => "lipidome",
            Self::Metabolome => "metabolome",
            Self::Proteome => "proteome",
        }
    }

    pub fn delimiter(&self) -> u8 {
        match self {
            Self::Lipidome => b',',
            Self::Metabolome | Self::Proteome => b'\t',
        }
    }

    pub fn molecule(&self) -> Molecule {
        match self {
            Self::Lipidome => Molecule::Lipid,
            Self::Metabolome => Molecule::Metabolite,
            Self::Proteome => Molecule::GeneProduct,
        }
    }
}

/// Layout of the omes folder holding the reference tables.
#[derive(Debug, Clone)]
pub struct OmesDir {
    root: PathBuf,
    proteome_file: String,
}

impl OmesDir {
    pub fn new(root: impl Into<PathBuf>, proteome_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            proteome_file: proteome_file.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the table backing `source`.
    pub fn table_path(&self, source: OmeSource) -> PathBuf {
        match source {
            OmeSource::Lipidome => self.root.join(LIPIDOME_FILE),
            OmeSource::Metabolome => self.root.join(METABOLOME_FILE),
            OmeSource::Proteome => self.root.join(&self.proteome_file),
        }
    }

    pub fn stop_words_path(&self) -> PathBuf {
        self.root.join(STOP_WORDS_FILE)
    }

    /// Load all three reference tables in priority order.
    pub fn load_tables(&self) -> Result<Vec<OmeTable>, VocabularyError> {
        OmeSource::PRIORITY
            .iter()
            .map(|source| OmeTable::load(*source, self.table_path(*source)))
            .collect()
    }
}

/// Identifier to normalised-synonym mapping parsed from one reference table.
#[derive(Debug, Clone)]
pub struct OmeTable {
    source: OmeSource,
    entries: IndexMap<String, IndexSet<String>>,
}

impl OmeTable {
    /// Read a reference table whose first column is the identifier and whose
    /// `Synonyms` column holds `"; "`-joined names.
    pub fn load(source: OmeSource, path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let table = source.table_name();
        if !path.is_file() {
            return Err(VocabularyError::MissingTable {
                table,
                path: path.to_path_buf(),
            });
        }
        let mut reader = ReaderBuilder::new()
            .delimiter(source.delimiter())
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|err| VocabularyError::Malformed { table, source: err })?;
        let headers = reader
            .headers()
            .map_err(|err| VocabularyError::Malformed { table, source: err })?
            .clone();
        if headers.is_empty() {
            return Err(VocabularyError::MissingColumn {
                table,
                column: "identifier",
            });
        }
        let synonym_idx = headers
            .iter()
            .position(|h| h.trim() == SYNONYMS_COLUMN)
            .ok_or(VocabularyError::MissingColumn {
                table,
                column: SYNONYMS_COLUMN,
            })?;

        let mut parsed = Self::empty(source);
        for record in reader.records() {
            let record = record.map_err(|err| VocabularyError::Malformed { table, source: err })?;
            let Some(id) = record.get(0) else {
                continue;
            };
            let raw = record.get(synonym_idx).unwrap_or_default();
            parsed.insert(id, raw);
        }
        info!(
            table,
            path = %path.display(),
            identifiers = parsed.entries.len(),
            "loaded reference table"
        );
        Ok(parsed)
    }

    /// An empty table for `source`; rows are added with [`OmeTable::insert`].
    pub fn empty(source: OmeSource) -> Self {
        Self {
            source,
            entries: IndexMap::new(),
        }
    }

    /// Add one row. Synonyms are normalised, placeholders dropped, and
    /// repeated identifiers merged. Rows without an identifier or left
    /// without synonyms are ignored.
    pub fn insert(&mut self, id: &str, raw_synonyms: &str) {
        if id.trim().is_empty() {
            debug!(table = self.source.table_name(), "row has no identifier");
            return;
        }
        let terms: IndexSet<String> = split_synonyms(raw_synonyms).collect();
        if terms.is_empty() {
            debug!(table = self.source.table_name(), id, "row has no usable synonyms");
            return;
        }
        self.entries.entry(id.to_string()).or_default().extend(terms);
    }

    pub fn source(&self) -> OmeSource {
        self.source
    }

    /// Identifiers in file order with their synonym sets.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.entries.iter().map(|(id, terms)| (id.as_str(), terms))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_synonyms(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(SYNONYM_DELIMITER)
        .map(normalize)
        .filter(|term| !PLACEHOLDERS.contains(&term.as_str()))
}

/// Stop words excluded from the matching vocabulary.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Read the single-column `stopwords` list and append `extra` words.
    pub fn load(path: impl AsRef<Path>, extra: &[String]) -> Result<Self, VocabularyError> {
        const TABLE: &str = "stop words";
        let path = path.as_ref();
        if !path.is_file() {
            return Err(VocabularyError::MissingTable {
                table: TABLE,
                path: path.to_path_buf(),
            });
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|source| VocabularyError::Malformed {
                table: TABLE,
                source,
            })?;
        let column = reader
            .headers()
            .map_err(|source| VocabularyError::Malformed {
                table: TABLE,
                source,
            })?
            .iter()
            .position(|h| h.trim() == STOP_WORDS_COLUMN)
            .ok_or(VocabularyError::MissingColumn {
                table: TABLE,
                column: STOP_WORDS_COLUMN,
            })?;

        let mut words = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| VocabularyError::Malformed {
                table: TABLE,
                source,
            })?;
            if let Some(word) = record.get(column) {
                words.push(word.to_string());
            }
        }
        words.extend(extra.iter().cloned());
        let stop_words = Self::from_words(words);
        info!(count = stop_words.len(), "loaded stop words");
        Ok(stop_words)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
