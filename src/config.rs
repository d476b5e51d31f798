//! Runtime configuration utilities for dance-partner.

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;

use crate::{
    data::{omes::OmesDir, synonyms::DEFAULT_MIN_LENGTH},
    error::ConfigError,
    nlp::pairs::PairOptions,
};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Folder holding the lipidome, metabolome, proteome and stop-word files.
    pub omes_dir: PathBuf,
    /// File name of the proteome table inside `omes_dir`.
    pub proteome_file: Option<String>,
    /// Root folder for pipeline outputs.
    pub outputs_dir: PathBuf,
    /// Shortest synonym kept in the matching vocabulary.
    pub min_term_length: usize,
    pub n_gram_max: usize,
    pub max_char_length: usize,
    pub padding: usize,
    /// Documents scanned concurrently by the `pairs` command.
    pub concurrency: usize,
    /// Stop words appended to the reference list.
    pub extra_stop_words: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let pairs = PairOptions::default();
        Self {
            omes_dir: PathBuf::from("./omes"),
            proteome_file: None,
            outputs_dir: PathBuf::from("./outputs"),
            min_term_length: DEFAULT_MIN_LENGTH,
            n_gram_max: pairs.n_gram_max,
            max_char_length: pairs.max_char_length,
            padding: pairs.padding,
            concurrency: 4,
            extra_stop_words: Vec::new(),
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let settings = Self {
            omes_dir: env::var("OMES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.omes_dir),
            proteome_file: env::var("PROTEOME_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            outputs_dir: env::var("OUTPUTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.outputs_dir),
            min_term_length: env_or("MIN_TERM_LENGTH", defaults.min_term_length)?,
            n_gram_max: env_or("N_GRAM_MAX", defaults.n_gram_max)?,
            max_char_length: env_or("MAX_CHAR_LENGTH", defaults.max_char_length)?,
            padding: env_or("PADDING", defaults.padding)?,
            concurrency: env_or("EXTRACT_CONCURRENCY", defaults.concurrency)?,
            extra_stop_words: env::var("EXTRA_STOP_WORDS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        };
        settings.validate().context("invalid configuration")?;
        Ok(settings)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pair_options().validate()?;
        if self.concurrency == 0 {
            return Err(ConfigError::NonPositive {
                name: "concurrency",
            });
        }
        Ok(())
    }

    pub fn pair_options(&self) -> PairOptions {
        PairOptions {
            n_gram_max: self.n_gram_max,
            max_char_length: self.max_char_length,
            padding: self.padding,
        }
    }

    /// Layout of the omes folder; requires a proteome file name.
    pub fn omes(&self) -> Result<OmesDir, ConfigError> {
        let proteome = self
            .proteome_file
            .as_deref()
            .ok_or(ConfigError::MissingProteome)?;
        Ok(OmesDir::new(self.omes_dir.clone(), proteome))
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}

fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Unparsable { name, value }),
        Err(_) => Ok(default),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.pair_options(), PairOptions::default());
        assert_eq!(settings.min_term_length, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn omes_requires_proteome() {
        let mut settings = Settings::default();
        assert!(matches!(settings.omes(), Err(ConfigError::MissingProteome)));
        settings.proteome_file = Some("UP0001_proteome.txt".into());
        assert!(settings.omes().is_ok());
    }

    #[test]
    fn zero_ngram_is_rejected() {
        let settings = Settings {
            n_gram_max: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NonPositive { name: "n_gram_max" })
        ));
    }

    #[test]
    fn list_values_are_trimmed() {
        assert_eq!(split_list(" cell, , protein "), vec!["cell", "protein"]);
    }
}
