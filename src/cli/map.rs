//! CLI entry-point for mapping terms to identifiers.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::CommonArgs,
    config::Settings,
    data::{
        synonyms::SynonymIndex,
        tables::{self, SYNONYM_TABLE_FILE},
    },
};

/// Args for the `map` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Terms to map.
    pub terms: Vec<String>,
    /// File of terms to map, one per line.
    #[arg(long)]
    pub terms_file: Option<PathBuf>,
    /// Pairs table whose `term_1` and `term_2` columns should be mapped.
    #[arg(long)]
    pub pairs: Option<PathBuf>,
    /// Keep terms that match nothing, with empty ID and Type.
    #[arg(long)]
    pub add_missing: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    args.common.apply(&mut settings);

    let mut terms = args.terms.clone();
    if let Some(path) = &args.terms_file {
        terms.extend(tables::read_terms(path)?);
    }
    if let Some(path) = &args.pairs {
        for row in tables::read_pairs(path)? {
            terms.push(row.term_1);
            terms.push(row.term_2);
        }
    }
    if terms.is_empty() {
        bail!("no terms to map; pass terms, --terms-file or --pairs");
    }

    let omes = settings.omes()?;
    let index = SynonymIndex::load(&omes).context("building synonym index")?;
    let table = index.map_synonyms(&terms, args.add_missing);
    let mapped = table.iter().filter(|row| row.id.is_some()).count();

    let path = settings.join_output(SYNONYM_TABLE_FILE);
    tables::write_synonym_table(&path, &table)?;
    info!(
        requested = terms.len(),
        mapped,
        rows = table.len(),
        path = %path.display(),
        "mapped synonyms"
    );
    Ok(())
}
