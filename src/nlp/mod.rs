//! Text processing: tokenisation and co-occurrence pair extraction.

pub mod pairs;
pub mod tokenize;
