use anyhow::Result;
use minisearch_core::{find_query_matches_with, read_line_lossy, DocUrl, InvertedIndex, ModifierMode};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    total_hits: usize,
    results: &'a BTreeSet<DocUrl>,
}

/// Ask for the corpus path on `out` and read it from `input`.
pub fn prompt_filename<R: BufRead, W: Write>(mut input: R, out: &mut W) -> Result<PathBuf> {
    write!(out, "Enter the filename: ")?;
    out.flush()?;
    let line = read_line_lossy(&mut input)?.unwrap_or_default();
    Ok(PathBuf::from(line))
}

/// Answers queries against one index until the user enters an empty line.
pub struct Session<'a> {
    index: &'a InvertedIndex,
    mode: ModifierMode,
    json: bool,
}

impl<'a> Session<'a> {
    pub fn new(index: &'a InvertedIndex, mode: ModifierMode, json: bool) -> Self {
        Self { index, mode, json }
    }

    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> Result<()> {
        loop {
            write!(out, "Enter a search query (press enter to quit): ")?;
            out.flush()?;
            let Some(query) = read_line_lossy(&mut input)? else {
                writeln!(out)?;
                break;
            };
            if query.is_empty() {
                break;
            }
            self.answer(&query, out)?;
        }
        writeln!(out, "Thank you for searching!")?;
        Ok(())
    }

    pub fn answer<W: Write>(&self, query: &str, out: &mut W) -> Result<()> {
        let matches = find_query_matches_with(self.index, query, self.mode);
        if self.json {
            let payload = SearchOutput { query, total_hits: matches.len(), results: &matches };
            writeln!(out, "{}", serde_json::to_string(&payload)?)?;
            return Ok(());
        }
        if matches.is_empty() {
            writeln!(out, "No matches found.")?;
        } else {
            writeln!(out, "Found {} matching pages", matches.len())?;
            for url in &matches {
                writeln!(out, "{url}")?;
            }
        }
        Ok(())
    }
}
