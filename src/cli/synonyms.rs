//! CLI entry-point for listing the matching vocabulary.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::CommonArgs,
    config::Settings,
    data::{
        omes::StopWords,
        synonyms::SynonymIndex,
        tables::{self, VOCABULARY_FILE},
    },
};

/// Args for the `synonyms` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Minimum number of characters in a term.
    #[arg(long)]
    pub min_length: Option<usize>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    args.common.apply(&mut settings);
    if let Some(min_length) = args.min_length {
        settings.min_term_length = min_length;
    }
    let terms = build_term_list(&settings)?;
    let path = settings.join_output(VOCABULARY_FILE);
    tables::write_vocabulary(&path, &terms)?;
    info!(terms = terms.len(), path = %path.display(), "vocabulary ready");
    Ok(())
}

/// Load the omes folder and return the stop-word filtered vocabulary.
pub fn build_term_list(settings: &Settings) -> Result<Vec<String>> {
    let omes = settings.omes()?;
    let index = SynonymIndex::load(&omes).context("building synonym index")?;
    let stop_words = StopWords::load(omes.stop_words_path(), &settings.extra_stop_words)
        .context("loading stop words")?;
    Ok(index.list_synonyms(&stop_words, settings.min_term_length))
}
