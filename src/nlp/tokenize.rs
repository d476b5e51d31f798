//! Sentence and word splitting used by the pair extractor.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pluggable tokenisation. Implementations must be deterministic for a
/// fixed input.
pub trait Tokenizer: Send + Sync {
    /// Split raw document text into ordered sentences.
    fn split_sentences(&self, text: &str) -> Vec<String>;
    /// Split a cleaned sentence into ordered words.
    fn split_words(&self, sentence: &str) -> Vec<String>;
}

/// Candidate sentence breaks: terminal punctuation (with trailing quotes or
/// brackets) followed by whitespace, or a blank line.
static BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["'”’)\]]*\s+|\n[ \t]*\n\s*"#).expect("valid regex")
});

/// Tokens that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "ca", "cf", "dr", "e.g", "eq", "eqs", "fig", "figs", "i.e", "no", "ref",
    "refs", "resp", "sp", "spp", "st", "vs",
];

/// Rule-based tokenizer: punctuation-driven sentence breaks with an
/// abbreviation list, whitespace word splitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl Tokenizer for RuleTokenizer {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for found in BREAK.find_iter(text) {
            let end = found.start() + found.as_str().trim_end().len();
            if found.as_str().starts_with(['.', '!', '?'])
                && !is_sentence_end(&text[start..found.start()], &text[found.end()..])
            {
                continue;
            }
            push_trimmed(&mut sentences, &text[start..end]);
            start = found.end();
        }
        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    fn split_words(&self, sentence: &str) -> Vec<String> {
        sentence.split_whitespace().map(str::to_string).collect()
    }
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Decide whether punctuation between `before` and `after` closes a sentence.
fn is_sentence_end(before: &str, after: &str) -> bool {
    // A lowercase continuation means the period belonged to the token.
    if after.chars().next().is_some_and(char::is_lowercase) {
        return false;
    }
    let last_token = before
        .split_whitespace()
        .next_back()
        .unwrap_or_default()
        .trim_start_matches(['(', '['])
        .to_lowercase();
    !ABBREVIATIONS.contains(&last_token.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = RuleTokenizer
            .split_sentences("ProteinAlpha binds MetaboliteB. It is stable! Is it? Yes");
        assert_eq!(
            sentences,
            vec!["ProteinAlpha binds MetaboliteB.", "It is stable!", "Is it?", "Yes"]
        );
    }

    #[test]
    fn abbreviations_and_lowercase_continuations_do_not_split() {
        let sentences = RuleTokenizer.split_sentences(
            "Smith et al. Showed binding (Fig. 2) at ca. 5 mM. Values e.g. 3 vs. 4 held.",
        );
        assert_eq!(
            sentences,
            vec![
                "Smith et al. Showed binding (Fig. 2) at ca. 5 mM.",
                "Values e.g. 3 vs. 4 held."
            ]
        );
    }

    #[test]
    fn blank_lines_break_sentences() {
        let sentences = RuleTokenizer.split_sentences("Introduction\n\nGlucose is a sugar.");
        assert_eq!(sentences, vec!["Introduction", "Glucose is a sugar."]);
    }

    #[test]
    fn decimals_stay_inside_a_sentence() {
        let sentences = RuleTokenizer.split_sentences("The ratio was 2.5 in ATP assays.");
        assert_eq!(sentences, vec!["The ratio was 2.5 in ATP assays."]);
    }

    #[test]
    fn words_split_on_whitespace() {
        assert_eq!(
            RuleTokenizer.split_words("tnf  alpha\tbinds"),
            vec!["tnf", "alpha", "binds"]
        );
    }
}
