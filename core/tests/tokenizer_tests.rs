use minisearch_core::tokenizer::{clean_token, gather_tokens};
use std::collections::BTreeSet;

#[test]
fn it_normalizes_case_and_punctuation() {
    let toks = gather_tokens("The Cat sat.");
    let expected: BTreeSet<String> = ["the", "cat", "sat"].iter().map(|s| s.to_string()).collect();
    assert_eq!(toks, expected);
}

#[test]
fn it_keeps_multi_word_terms_from_internal_punctuation() {
    let toks = gather_tokens("Visit the U.S.A! e-mail me");
    assert!(toks.contains("u s a"));
    assert!(toks.contains("e mail"));
    assert!(!toks.contains("usa"));
}

#[test]
fn it_skips_tokens_that_clean_to_nothing() {
    let toks = gather_tokens("-- ... hello !!! ?");
    assert_eq!(toks.len(), 1);
    assert!(toks.contains("hello"));
}

#[test]
fn every_term_is_lowercase_without_punctuation() {
    let text = "Some MIXED-case, text; with (odd) punctuation... & numbers 42x!";
    for term in gather_tokens(text) {
        assert!(!term.is_empty());
        assert!(term.chars().all(|c| c.is_ascii_lowercase() || c == ' '), "bad term {term:?}");
        assert_eq!(clean_token(&term), term);
    }
}
