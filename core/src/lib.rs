//! Boolean keyword search over a corpus of pages.
//!
//! A corpus is a sequence of lines alternating between a page identifier
//! (usually a URL) and the page text. [`build_index`] turns it into an
//! [`InvertedIndex`], and [`find_query_matches`] answers queries such as
//! `cat +dog -bird` against it.

pub mod index;
pub mod query;
pub mod tokenizer;

pub use index::{build_index, build_index_from_reader, load_corpus, read_line_lossy, InvertedIndex};
pub use query::{find_query_matches, find_query_matches_with, Clause, ModifierMode, Query};
pub use tokenizer::{clean_token, gather_tokens};

/// A normalized, searchable term. Never empty; lowercase letters and spaces only.
pub type Term = String;

/// A page identifier, kept exactly as it appeared in the corpus.
pub type DocUrl = String;
