//! Reference vocabularies, corpus discovery and tabular outputs.

pub mod corpus;
pub mod normalize;
pub mod omes;
pub mod synonyms;
pub mod tables;
