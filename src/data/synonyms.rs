//! Synonym index: resolves normalised names to identifiers with fixed
//! source priority (lipid, then metabolite, then gene product).

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    data::{
        normalize::normalize,
        omes::{Molecule, OmeTable, OmesDir, StopWords},
    },
    error::VocabularyError,
};

/// Default minimum length of a vocabulary term.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// A normalised synonym bound to one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SynonymRecord {
    pub id: String,
    pub synonym: String,
    pub molecule: Molecule,
}

/// Row of the synonym table written by `map`. Unmapped terms carry no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedSynonym {
    #[serde(rename = "Synonym")]
    pub synonym: String,
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "Type")]
    pub molecule: Option<Molecule>,
}

impl From<&SynonymRecord> for MappedSynonym {
    fn from(record: &SynonymRecord) -> Self {
        Self {
            synonym: record.synonym.clone(),
            id: Some(record.id.clone()),
            molecule: Some(record.molecule),
        }
    }
}

/// Immutable index over the three reference vocabularies for one run.
#[derive(Debug, Clone)]
pub struct SynonymIndex {
    tables: Vec<OmeTable>,
    resolved: IndexMap<String, SynonymRecord>,
}

impl SynonymIndex {
    /// Load the lipidome, metabolome and proteome tables from `omes`.
    pub fn load(omes: &OmesDir) -> Result<Self, VocabularyError> {
        let index = Self::from_tables(omes.load_tables()?);
        info!(
            synonyms = index.resolved.len(),
            root = %omes.root().display(),
            "built synonym index"
        );
        Ok(index)
    }

    /// Build from already parsed tables. Tables are ordered by source
    /// priority; within a table the first identifier listing a synonym wins.
    pub fn from_tables(mut tables: Vec<OmeTable>) -> Self {
        tables.sort_by_key(OmeTable::source);
        let mut resolved = IndexMap::new();
        let mut shadowed = 0usize;
        for table in &tables {
            let molecule = table.source().molecule();
            for (id, terms) in table.entries() {
                for synonym in terms {
                    if resolved.contains_key(synonym) {
                        shadowed += 1;
                        continue;
                    }
                    resolved.insert(
                        synonym.clone(),
                        SynonymRecord {
                            id: id.to_string(),
                            synonym: synonym.clone(),
                            molecule,
                        },
                    );
                }
            }
        }
        debug!(shadowed, "synonyms resolved by source priority");
        Self { tables, resolved }
    }

    /// Every `(id, synonym, type)` row across all sources, including
    /// synonyms shadowed by a higher-priority source.
    pub fn records(&self) -> impl Iterator<Item = SynonymRecord> + '_ {
        self.tables.iter().flat_map(|table| {
            let molecule = table.source().molecule();
            table.entries().flat_map(move |(id, terms)| {
                terms.iter().map(move |synonym| SynonymRecord {
                    id: id.to_string(),
                    synonym: synonym.clone(),
                    molecule,
                })
            })
        })
    }

    /// Resolve a raw term to its winning record, if any.
    pub fn resolve(&self, term: &str) -> Option<&SynonymRecord> {
        self.resolved.get(&normalize(term))
    }

    /// Map raw terms to identifiers.
    ///
    /// Matched terms come back once each, sorted by synonym. With
    /// `add_missing`, distinct terms that matched nothing follow in input
    /// order with empty `ID` and `Type`. Terms that normalise to nothing are
    /// ignored.
    pub fn map_synonyms<S: AsRef<str>>(&self, terms: &[S], add_missing: bool) -> Vec<MappedSynonym> {
        let normalized: IndexSet<String> = terms
            .iter()
            .map(|term| normalize(term.as_ref()))
            .filter(|term| !term.is_empty())
            .collect();

        let mut found: Vec<MappedSynonym> = normalized
            .iter()
            .filter_map(|term| self.resolved.get(term))
            .map(MappedSynonym::from)
            .collect();
        found.sort_by(|a, b| a.synonym.cmp(&b.synonym));

        if add_missing {
            let missing = normalized
                .into_iter()
                .filter(|term| !self.resolved.contains_key(term))
                .map(|synonym| MappedSynonym {
                    synonym,
                    id: None,
                    molecule: None,
                });
            found.extend(missing);
        }
        found
    }

    /// The flat matching vocabulary: every synonym across all sources, minus
    /// stop words and terms shorter than `min_length` characters, in first
    /// appearance order.
    pub fn list_synonyms(&self, stop_words: &StopWords, min_length: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records()
            .map(|record| record.synonym)
            .filter(|term| !stop_words.contains(term))
            .filter(|term| term.chars().count() >= min_length)
            .filter(|term| seen.insert(term.clone()))
            .collect()
    }

    /// Number of distinct resolvable synonyms.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::omes::OmeSource;

    fn table(source: OmeSource, rows: &[(&str, &str)]) -> OmeTable {
        let mut table = OmeTable::empty(source);
        for (id, synonyms) in rows {
            table.insert(id, synonyms);
        }
        table
    }

    #[test]
    fn from_tables_orders_by_priority_regardless_of_input_order() {
        let index = SynonymIndex::from_tables(vec![
            table(OmeSource::Proteome, &[("P1", "shared")]),
            table(OmeSource::Lipidome, &[("L1", "shared")]),
        ]);
        let record = index.resolve("Shared").unwrap();
        assert_eq!(record.id, "L1");
        assert_eq!(record.molecule, Molecule::Lipid);
    }

    #[test]
    fn first_identifier_in_file_order_wins_within_a_source() {
        let index = SynonymIndex::from_tables(vec![table(
            OmeSource::Metabolome,
            &[("CHEBI:2", "water"), ("CHEBI:1", "water; h2o")],
        )]);
        assert_eq!(index.resolve("water").unwrap().id, "CHEBI:2");
        assert_eq!(index.resolve("H2O").unwrap().id, "CHEBI:1");
        assert_eq!(index.records().count(), 3);
    }
}
