use crate::tokenizer::gather_tokens;
use crate::{DocUrl, Term};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

static NO_POSTINGS: BTreeSet<DocUrl> = BTreeSet::new();

/// Term -> set of page identifiers. Only [`build_index`] and its readers create
/// one; it is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: BTreeMap<Term, BTreeSet<DocUrl>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    fn add_page(&mut self, url: &str, text: &str) {
        for term in gather_tokens(text) {
            self.postings.entry(term).or_default().insert(url.to_string());
        }
    }

    /// Pages containing `term`; empty for unknown terms.
    pub fn postings(&self, term: &str) -> &BTreeSet<DocUrl> {
        self.postings.get(term).unwrap_or(&NO_POSTINGS)
    }

    pub fn contains_term(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<DocUrl>)> + '_ {
        self.postings.iter().map(|(t, p)| (t.as_str(), p))
    }
}

/// Build an index from corpus lines that alternate page identifier and page text.
///
/// Returns the number of complete pairs read. A trailing identifier with no
/// text line is dropped.
pub fn build_index<I, S>(lines: I) -> (usize, InvertedIndex)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index = InvertedIndex::new();
    let mut num_pages = 0usize;
    let mut lines = lines.into_iter();
    loop {
        let Some(url) = lines.next() else { break };
        let Some(text) = lines.next() else {
            tracing::debug!(url = url.as_ref(), "dropping unpaired trailing line");
            break;
        };
        index.add_page(url.as_ref(), text.as_ref());
        num_pages += 1;
    }
    tracing::debug!(num_pages, num_terms = index.num_terms(), "built index");
    (num_pages, index)
}

/// Read one line from `reader` without its `\n` or `\r\n` terminator.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than failing
/// the read. Returns `None` at end of input.
pub fn read_line_lossy<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Like [`build_index`], reading lines from `reader`. Only I/O failures are errors.
pub fn build_index_from_reader<R: BufRead>(mut reader: R) -> Result<(usize, InvertedIndex)> {
    let mut lines = Vec::new();
    while let Some(line) = read_line_lossy(&mut reader)? {
        lines.push(line);
    }
    Ok(build_index(lines))
}

/// Open the corpus file at `path` and index it.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<(usize, InvertedIndex)> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    build_index_from_reader(BufReader::new(f))
        .with_context(|| format!("reading corpus {}", path.display()))
}
