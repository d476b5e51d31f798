//! Sentence-level co-occurrence extraction of vocabulary term pairs.
//!
//! Each sentence is cleaned, split into words and expanded into every
//! contiguous n-gram up to `n_gram_max` words. The n-gram set is intersected
//! with the vocabulary, so the per-sentence cost does not depend on the
//! vocabulary size. Every pair of distinct hits is located in the sentence,
//! ordered by position and emitted with a bounded text segment.

use std::{
    collections::{BTreeSet, HashSet},
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    data::{
        corpus::paper_id,
        normalize::{clean_segment, clean_sentence, is_word_char},
    },
    error::ConfigError,
    nlp::tokenize::{RuleTokenizer, Tokenizer},
};

const DOCUMENT_EXTENSION: &str = "txt";

/// Tuning knobs for pair extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairOptions {
    /// Longest n-gram (in words) matched against the vocabulary.
    pub n_gram_max: usize,
    /// Longest segment, in characters, that may be emitted.
    pub max_char_length: usize,
    /// Characters kept on either side of the pair when windowing.
    pub padding: usize,
}

impl Default for PairOptions {
    fn default() -> Self {
        Self {
            n_gram_max: 3,
            max_char_length: 250,
            padding: 10,
        }
    }
}

impl PairOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_gram_max == 0 {
            return Err(ConfigError::NonPositive { name: "n_gram_max" });
        }
        if self.max_char_length == 0 {
            return Err(ConfigError::NonPositive {
                name: "max_char_length",
            });
        }
        Ok(())
    }
}

/// One pair of vocabulary terms found in one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceMatch {
    pub paper_id: String,
    pub term_1: String,
    pub term_2: String,
    pub id: String,
    pub sentence_index: usize,
    pub segment_length: usize,
    pub segment: String,
}

impl SentenceMatch {
    pub const COLUMNS: [&'static str; 7] = [
        "paper_id",
        "term_1",
        "term_2",
        "id",
        "sentence_index",
        "segment_length",
        "segment",
    ];
}

/// The controlled vocabulary, cleaned the same way sentences are.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: HashSet<String>,
}

impl Vocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|term| clean_sentence(term.as_ref()))
            .filter(|term| !term.trim().is_empty())
            .collect();
        Self { terms }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Result of scanning one document's text.
#[derive(Debug, Clone, Default)]
pub struct DocumentScan {
    pub paper_id: String,
    pub sentences: usize,
    pub matches: Vec<SentenceMatch>,
}

/// What happened to one file handed to the extractor.
#[derive(Debug)]
pub enum DocumentOutcome {
    Scanned(DocumentScan),
    /// Not a plain-text document.
    Ignored,
    Unreadable(io::Error),
}

/// Counters for a whole corpus run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub documents: usize,
    pub ignored: usize,
    pub unreadable: usize,
    pub sentences: usize,
    pub pairs: usize,
}

/// Accumulates document outcomes into a sorted pairs table.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub stats: ScanStats,
    pub matches: Vec<SentenceMatch>,
}

impl ScanReport {
    /// Fold one outcome in. `path` is only used for logging.
    pub fn record(&mut self, path: &Path, outcome: DocumentOutcome) {
        match outcome {
            DocumentOutcome::Scanned(scan) => {
                self.stats.documents += 1;
                self.stats.sentences += scan.sentences;
                self.stats.pairs += scan.matches.len();
                self.matches.extend(scan.matches);
            }
            DocumentOutcome::Ignored => {
                self.stats.ignored += 1;
                debug!(path = %path.display(), "ignoring non-text file");
            }
            DocumentOutcome::Unreadable(err) => {
                self.stats.unreadable += 1;
                warn!(path = %path.display(), error = %err, "skipping unreadable document");
            }
        }
    }

    /// Stable-sort rows by paper id and return the finished report.
    pub fn finish(mut self) -> Self {
        self.matches.sort_by(|a, b| a.paper_id.cmp(&b.paper_id));
        self
    }
}

/// Finds co-occurring vocabulary term pairs in documents.
#[derive(Clone)]
pub struct PairExtractor {
    vocabulary: Vocabulary,
    tokenizer: Arc<dyn Tokenizer>,
    options: PairOptions,
    verbose: bool,
}

impl std::fmt::Debug for PairExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairExtractor")
            .field("vocabulary", &self.vocabulary.len())
            .field("options", &self.options)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl PairExtractor {
    pub fn new(vocabulary: Vocabulary, options: PairOptions) -> Self {
        Self {
            vocabulary,
            tokenizer: Arc::new(RuleTokenizer),
            options,
            verbose: false,
        }
    }

    /// Swap the sentence/word splitter.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Log per-document progress at `info` instead of `debug`.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn options(&self) -> &PairOptions {
        &self.options
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Scan every path in order and return rows sorted by paper id.
    pub fn scan(&self, paths: &[PathBuf]) -> ScanReport {
        let mut report = ScanReport::default();
        for path in paths {
            report.record(path, self.scan_document(path));
        }
        let report = report.finish();
        let stats = report.stats;
        info!(?stats, "finished corpus scan");
        report
    }

    /// Read and scan one file. Only `.txt` files are considered documents.
    pub fn scan_document(&self, path: &Path) -> DocumentOutcome {
        if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
            return DocumentOutcome::Ignored;
        }
        if self.verbose {
            info!(path = %path.display(), "scanning document");
        } else {
            debug!(path = %path.display(), "scanning document");
        }
        match fs::read_to_string(path) {
            Ok(text) => DocumentOutcome::Scanned(self.scan_text(&paper_id(path), &text)),
            Err(err) => DocumentOutcome::Unreadable(err),
        }
    }

    /// Scan raw document text.
    pub fn scan_text(&self, paper_id: &str, text: &str) -> DocumentScan {
        let sentences = self.tokenizer.split_sentences(text);
        let mut matches = Vec::new();
        for (sentence_index, raw) in sentences.iter().enumerate() {
            let sentence = clean_sentence(raw);
            self.match_sentence(paper_id, sentence_index, &sentence, &mut matches);
        }
        DocumentScan {
            paper_id: paper_id.to_string(),
            sentences: sentences.len(),
            matches,
        }
    }

    /// Pairs for raw document text, without the bookkeeping.
    pub fn extract_text(&self, paper_id: &str, text: &str) -> Vec<SentenceMatch> {
        self.scan_text(paper_id, text).matches
    }

    fn match_sentence(
        &self,
        paper_id: &str,
        sentence_index: usize,
        sentence: &str,
        out: &mut Vec<SentenceMatch>,
    ) {
        let found = self.found_terms(sentence);
        if found.len() < 2 {
            return;
        }
        // BTreeSet iteration yields each unordered pair once, smaller term first.
        for (idx, first) in found.iter().enumerate() {
            for second in found.iter().skip(idx + 1) {
                if let Some(row) = self.build_row(paper_id, sentence_index, sentence, first, second)
                {
                    out.push(row);
                }
            }
        }
    }

    /// Vocabulary terms present among the sentence's n-grams.
    fn found_terms(&self, sentence: &str) -> BTreeSet<String> {
        let words = self.tokenizer.split_words(sentence);
        let mut found = BTreeSet::new();
        for n in 1..=self.options.n_gram_max.min(words.len()) {
            for window in words.windows(n) {
                let gram = window.join(" ");
                if self.vocabulary.contains(&gram) {
                    found.insert(gram);
                }
            }
        }
        found
    }

    fn build_row(
        &self,
        paper_id: &str,
        sentence_index: usize,
        sentence: &str,
        a: &str,
        b: &str,
    ) -> Option<SentenceMatch> {
        let offset_a = locate(sentence, a)?;
        let offset_b = locate(sentence, b)?;
        // `a < b` here. A shared start means one term nests inside the
        // other; the longer, lexicographically larger term goes first.
        let ((first, first_at), (second, second_at)) = if offset_a < offset_b {
            ((a, offset_a), (b, offset_b))
        } else {
            ((b, offset_b), (a, offset_a))
        };

        let segment = self.segment(
            sentence,
            first_at..first_at + first.chars().count(),
            second_at..second_at + second.chars().count(),
        )?;
        Some(SentenceMatch {
            paper_id: paper_id.to_string(),
            term_1: first.to_string(),
            term_2: second.to_string(),
            id: paper_id.to_string(),
            sentence_index,
            segment_length: segment.chars().count(),
            segment: clean_segment(&segment),
        })
    }

    /// The whole sentence when short enough, otherwise a padded window
    /// around both terms (character ranges). `None` if even the window is
    /// too long.
    fn segment(
        &self,
        sentence: &str,
        first: std::ops::Range<usize>,
        second: std::ops::Range<usize>,
    ) -> Option<String> {
        let length = sentence.chars().count();
        let PairOptions {
            max_char_length,
            padding,
            ..
        } = self.options;
        if length < max_char_length {
            return Some(sentence.to_string());
        }
        let start = first.start.saturating_sub(padding);
        let end = (first.end.max(second.end) + padding).min(length);
        if end - start > max_char_length {
            return None;
        }
        Some(sentence.chars().skip(start).take(end - start).collect())
    }
}

/// Character offset of the first word-bounded occurrence of `term`.
fn locate(sentence: &str, term: &str) -> Option<usize> {
    let head = term.chars().next()?;
    let tail = term.chars().next_back()?;
    let mut from = 0;
    while let Some(rel) = sentence[from..].find(term) {
        let start = from + rel;
        let end = start + term.len();
        let before = sentence[..start].chars().next_back();
        let after = sentence[end..].chars().next();
        if is_boundary(before, Some(head)) && is_boundary(Some(tail), after) {
            return Some(sentence[..start].chars().count());
        }
        from = start + head.len_utf8();
    }
    None
}

/// Word boundary between two adjacent characters (`None` is a string edge).
fn is_boundary(left: Option<char>, right: Option<char>) -> bool {
    left.is_some_and(is_word_char) != right.is_some_and(is_word_char)
}
