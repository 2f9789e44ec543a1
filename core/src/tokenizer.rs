use crate::Term;
use std::collections::BTreeSet;

/// Normalize one raw token.
///
/// Leading and trailing ASCII punctuation is stripped. In what remains, ASCII
/// letters are lowercased and every other byte becomes a space, so `"U.S.A"`
/// cleans to `"u s a"` and the two-byte `é` becomes two spaces. Returns an
/// empty string when nothing is left.
pub fn clean_token(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_ascii_punctuation())
        .bytes()
        .map(|b| if b.is_ascii_alphabetic() { b.to_ascii_lowercase() as char } else { ' ' })
        .collect()
}

/// Split text on whitespace and collect the distinct, non-empty cleaned tokens.
pub fn gather_tokens(text: &str) -> BTreeSet<Term> {
    text.split_whitespace()
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_outer_punctuation_and_lowercases() {
        assert_eq!(clean_token("Hello!!"), "hello");
        assert_eq!(clean_token("\"(Quoted)\""), "quoted");
    }

    #[test]
    fn internal_punctuation_and_digits_become_spaces() {
        assert_eq!(clean_token("U.S.A"), "u s a");
        assert_eq!(clean_token("mp3"), "mp ");
        assert_eq!(clean_token("don't"), "don t");
    }

    #[test]
    fn punctuation_only_is_empty() {
        for raw in ["", "!", "...", "+-+", "#$%&'()*,/:;<=>?@[\\]^_`{|}~"] {
            assert_eq!(clean_token(raw), "", "raw token {raw:?}");
        }
    }

    #[test]
    fn non_ascii_letters_become_one_space_per_byte() {
        assert_eq!(clean_token("café"), "caf  ");
        assert_eq!(clean_token("naïve!"), "na  ve");
    }

    #[test]
    fn cleaning_own_output_is_a_no_op() {
        let once = clean_token("U.S.A");
        assert_eq!(clean_token(&once), once);
    }

    #[test]
    fn gather_collapses_duplicates() {
        let toks = gather_tokens("The Cat sat. the CAT!");
        let expected: BTreeSet<Term> = ["cat", "sat", "the"].iter().map(|s| s.to_string()).collect();
        assert_eq!(toks, expected);
    }
}
