//! Command-line interface wiring for dance-partner.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::Settings;

pub mod map;
pub mod pairs;
pub mod synonyms;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Mine biomolecule relationships from scientific papers",
    long_about = None
)]
pub struct Cli {
    /// Log per-document progress.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Synonyms(args) => synonyms::run(args, settings).await,
            Commands::Map(args) => map::run(args, settings).await,
            Commands::Pairs(args) => pairs::run(args, settings, self.verbose).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the matching vocabulary built from the omes folder.
    Synonyms(synonyms::Args),
    /// Map terms to lipid, metabolite or gene product identifiers.
    Map(map::Args),
    /// Extract co-occurring term pairs from a directory of papers.
    Pairs(pairs::Args),
}

/// Locations shared by every sub-command; each overrides its setting.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Folder holding the reference tables and stop-word list.
    #[arg(long)]
    pub omes_dir: Option<PathBuf>,
    /// Proteome table file name inside the omes folder.
    #[arg(long)]
    pub proteome: Option<String>,
    /// Folder results are written to.
    #[arg(long)]
    pub outputs_dir: Option<PathBuf>,
}

impl CommonArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.omes_dir {
            settings.omes_dir = dir.clone();
        }
        if let Some(proteome) = &self.proteome {
            settings.proteome_file = Some(proteome.clone());
        }
        if let Some(dir) = &self.outputs_dir {
            settings.outputs_dir = dir.clone();
        }
    }
}
