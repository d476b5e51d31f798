//! Literature mining of biomolecule relationships: synonym resolution over
//! omics reference tables and sentence-level term pair extraction.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
