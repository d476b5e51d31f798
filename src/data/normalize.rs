//! String normalisation shared by the synonym index and the pair extractor.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\s\w]").expect("valid regex"));

/// Canonical synonym key: lower-cased, trimmed, ASCII alphanumerics only.
///
/// Lower-casing happens first so that characters whose lowercase form
/// decomposes into ASCII (e.g. `İ`) keep their ASCII part. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Clean a sentence (or a vocabulary term) for n-gram matching.
///
/// Lower-cases, turns newlines into spaces and drops everything that is
/// neither a word character nor whitespace. Word characters follow the
/// Unicode definition, so accented letters and underscores survive.
pub fn clean_sentence(text: &str) -> String {
    let lowered = text.to_lowercase().replace(['\r', '\n'], " ");
    NON_WORD.replace_all(&lowered, "").into_owned()
}

/// Final pass applied to emitted segments: ASCII alphanumerics and spaces.
pub fn clean_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Whether `c` counts as a word character for boundary checks.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  TNF-alpha "), "tnfalpha");
        assert_eq!(normalize("PC(16:0/18:1)"), "pc160181");
        assert_eq!(normalize("TNF-α"), "tnf");
    }

    #[test]
    fn clean_sentence_keeps_whitespace_and_unicode_letters() {
        assert_eq!(
            clean_sentence("ProteinAlpha binds\nMetabolite-B (Café)."),
            "proteinalpha binds metaboliteb café"
        );
        assert_eq!(clean_sentence("snake_case ok!"), "snake_case ok");
    }

    #[test]
    fn clean_segment_is_ascii_only() {
        assert_eq!(clean_segment("β-catenin_x binds atp"), "cateninx binds atp");
    }
}
