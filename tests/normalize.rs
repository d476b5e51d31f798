use dance_partner::data::normalize::{clean_sentence, normalize};
use proptest::prelude::*;

#[test]
fn punctuation_and_case_collapse_to_one_key() {
    assert_eq!(normalize("PC(16:0/18:1)"), normalize("pc 16 0 18 1"));
    assert_eq!(normalize(" D-Glucose "), "dglucose");
    assert_eq!(normalize("---"), "");
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "\\PC*") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn normalize_yields_lowercase_ascii_alphanumerics(raw in "\\PC*") {
        let key = normalize(&raw);
        prop_assert!(key.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn cleaned_sentences_have_no_punctuation(raw in "[A-Za-z0-9 ,.;:()\\-\n]{0,80}") {
        let cleaned = clean_sentence(&raw);
        prop_assert!(cleaned.chars().all(|c| c.is_alphanumeric() || c == ' '));
    }
}
