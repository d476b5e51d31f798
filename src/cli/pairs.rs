//! CLI entry-point for sentence-level pair extraction.

use std::{fs::File, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    cli::{synonyms::build_term_list, CommonArgs},
    config::Settings,
    data::{
        corpus,
        tables::{self, PAIRS_FILE},
    },
    nlp::pairs::{PairExtractor, ScanReport, ScanStats, Vocabulary},
};

const SUMMARY_FILE: &str = "pairs_summary.json";

/// Args for the `pairs` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Directory of papers in plain-text format. Subdirectories are searched.
    #[arg(long)]
    pub papers: PathBuf,
    /// Match against this term list instead of the omes vocabulary.
    #[arg(long)]
    pub terms_file: Option<PathBuf>,
    /// Longest n-gram, in words, matched against the vocabulary.
    #[arg(long)]
    pub n_gram_max: Option<usize>,
    /// Longest segment, in characters, kept for a pair.
    #[arg(long)]
    pub max_char_length: Option<usize>,
    /// Characters of context kept around the pair when windowing.
    #[arg(long)]
    pub padding: Option<usize>,
    /// Documents scanned concurrently.
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        self.common.apply(settings);
        if let Some(value) = self.n_gram_max {
            settings.n_gram_max = value;
        }
        if let Some(value) = self.max_char_length {
            settings.max_char_length = value;
        }
        if let Some(value) = self.padding {
            settings.padding = value;
        }
        if let Some(value) = self.concurrency {
            settings.concurrency = value;
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    papers: String,
    vocabulary: usize,
    #[serde(flatten)]
    stats: ScanStats,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings, verbose: bool) -> Result<()> {
    args.apply(&mut settings);
    settings.validate()?;

    let terms = match &args.terms_file {
        Some(path) => tables::read_terms(path)?,
        None => build_term_list(&settings)?,
    };
    let vocabulary = Vocabulary::new(&terms);
    if vocabulary.is_empty() {
        warn!("vocabulary is empty; no pairs can be found");
    }
    info!(terms = vocabulary.len(), "vocabulary ready");

    let documents = corpus::collect_documents(&args.papers)
        .with_context(|| format!("listing papers under {}", args.papers.display()))?;
    let extractor = Arc::new(
        PairExtractor::new(vocabulary, settings.pair_options()).with_verbose(verbose),
    );

    // `buffered` keeps discovery order so output is deterministic.
    let outcomes = stream::iter(documents)
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            async move {
                let worker_path = path.clone();
                let outcome =
                    tokio::task::spawn_blocking(move || extractor.scan_document(&worker_path))
                        .await;
                (path, outcome)
            }
        })
        .buffered(settings.concurrency)
        .collect::<Vec<_>>()
        .await;

    let mut report = ScanReport::default();
    for (path, outcome) in outcomes {
        let outcome =
            outcome.with_context(|| format!("scan worker failed on {}", path.display()))?;
        report.record(&path, outcome);
    }
    let report = report.finish();

    let pairs_path = settings.join_output(PAIRS_FILE);
    tables::write_pairs(&pairs_path, &report.matches)?;

    let summary = RunSummary {
        papers: args.papers.display().to_string(),
        vocabulary: extractor.vocabulary().len(),
        stats: report.stats,
    };
    let summary_path = settings.join_output(SUMMARY_FILE);
    let file = File::create(&summary_path)
        .with_context(|| format!("create {}", summary_path.display()))?;
    serde_json::to_writer_pretty(file, &summary)?;
    info!(?summary, path = %pairs_path.display(), "pair extraction complete");
    Ok(())
}
