//! Query parsing and evaluation.
//!
//! A query line is a bag of whitespace-separated tokens. Plain tokens are OR-ed
//! together. A token prefixed with `+` is a required term and one prefixed with
//! `-` is an excluded term; both only affect the plain terms evaluated after
//! them. Tokens are evaluated in lexicographic order of their raw text, so in
//! `cat +dog` the `+dog` (which sorts first) restricts `cat`, while in
//! `!cat +dog` it does not.

use crate::index::InvertedIndex;
use crate::tokenizer::clean_token;
use crate::{DocUrl, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How `+` and `-` prefixes on query tokens are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierMode {
    /// The prefix is read off the raw token before cleaning.
    #[default]
    Prefix,
    /// Every token is cleaned first. Cleaning strips `+`/`-` as punctuation,
    /// so no token ever acts as a modifier and all of them are plain terms.
    Literal,
}

impl FromStr for ModifierMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "literal" => Ok(Self::Literal),
            other => Err(format!("unknown modifier mode '{other}', expected 'prefix' or 'literal'")),
        }
    }
}

impl fmt::Display for ModifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => f.write_str("prefix"),
            Self::Literal => f.write_str("literal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Plain(Term),
    Required(Term),
    Excluded(Term),
}

impl Clause {
    pub fn term(&self) -> &str {
        match self {
            Clause::Plain(t) | Clause::Required(t) | Clause::Excluded(t) => t,
        }
    }
}

/// A parsed query line. Clauses are kept in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    pub fn parse(line: &str, mode: ModifierMode) -> Self {
        let raw_tokens: BTreeSet<&str> = line.split_whitespace().collect();
        let clauses = raw_tokens
            .into_iter()
            .filter_map(|raw| {
                let clause = match mode {
                    ModifierMode::Literal => Clause::Plain(clean_token(raw)),
                    ModifierMode::Prefix => {
                        if let Some(rest) = raw.strip_prefix('+') {
                            Clause::Required(clean_token(rest))
                        } else if let Some(rest) = raw.strip_prefix('-') {
                            Clause::Excluded(clean_token(rest))
                        } else {
                            Clause::Plain(clean_token(raw))
                        }
                    }
                };
                (!clause.term().is_empty()).then_some(clause)
            })
            .collect();
        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] { &self.clauses }

    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

    pub fn plain_terms(&self) -> BTreeSet<&str> {
        self.terms_where(|c| matches!(c, Clause::Plain(_)))
    }

    pub fn required_terms(&self) -> BTreeSet<&str> {
        self.terms_where(|c| matches!(c, Clause::Required(_)))
    }

    pub fn excluded_terms(&self) -> BTreeSet<&str> {
        self.terms_where(|c| matches!(c, Clause::Excluded(_)))
    }

    fn terms_where(&self, keep: impl Fn(&Clause) -> bool) -> BTreeSet<&str> {
        self.clauses
            .iter()
            .filter(|c| keep(*c))
            .map(Clause::term)
            .collect()
    }

    /// Evaluate against `index`. Modifiers apply only to plain terms that come
    /// after them in clause order.
    pub fn evaluate(&self, index: &InvertedIndex) -> BTreeSet<DocUrl> {
        let mut required: BTreeSet<&str> = BTreeSet::new();
        let mut excluded: BTreeSet<&str> = BTreeSet::new();
        let mut result = BTreeSet::new();
        for clause in &self.clauses {
            match clause {
                Clause::Required(t) => {
                    required.insert(t.as_str());
                }
                Clause::Excluded(t) => {
                    excluded.insert(t.as_str());
                }
                Clause::Plain(t) => {
                    let matched = match_plain_term(index, t, &required, &excluded);
                    result = union(&result, &matched);
                }
            }
        }
        result
    }
}

fn match_plain_term(
    index: &InvertedIndex,
    term: &str,
    required: &BTreeSet<&str>,
    excluded: &BTreeSet<&str>,
) -> BTreeSet<DocUrl> {
    let mut matched = index.postings(term).clone();
    for r in required {
        matched = intersection(&matched, index.postings(r));
    }
    for e in excluded {
        matched = difference(&matched, index.postings(e));
    }
    matched
}

/// Pages matching `line`, with `+`/`-` read as modifiers.
pub fn find_query_matches(index: &InvertedIndex, line: &str) -> BTreeSet<DocUrl> {
    find_query_matches_with(index, line, ModifierMode::default())
}

pub fn find_query_matches_with(index: &InvertedIndex, line: &str, mode: ModifierMode) -> BTreeSet<DocUrl> {
    let query = Query::parse(line, mode);
    let matches = query.evaluate(index);
    tracing::debug!(
        query = line,
        %mode,
        plain = ?query.plain_terms(),
        required = ?query.required_terms(),
        excluded = ?query.excluded_terms(),
        hits = matches.len(),
        "evaluated query"
    );
    matches
}

pub fn intersection<T: Ord + Clone>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> BTreeSet<T> {
    a.intersection(b).cloned().collect()
}

pub fn difference<T: Ord + Clone>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> BTreeSet<T> {
    a.difference(b).cloned().collect()
}

pub fn union<T: Ord + Clone>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> BTreeSet<T> {
    a.union(b).cloned().collect()
}
