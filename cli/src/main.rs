mod session;

use anyhow::Result;
use clap::Parser;
use minisearch_core::{load_corpus, InvertedIndex, ModifierMode};
use session::{prompt_filename, Session};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "minisearch")]
#[command(about = "Index a corpus of pages and answer boolean keyword queries", long_about = None)]
struct Cli {
    /// Corpus file of alternating URL and page-text lines. Prompted for when omitted.
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Answer a single query and exit instead of prompting
    #[arg(long)]
    query: Option<String>,
    /// How +/- query prefixes are read: "prefix" or "literal"
    #[arg(long, default_value_t = ModifierMode::Prefix)]
    modifiers: ModifierMode,
    /// Print each result as a JSON object
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    let corpus = match cli.corpus {
        Some(path) => path,
        None => prompt_filename(&mut input, &mut out)?,
    };
    let (num_pages, index) = index_corpus(&corpus);
    let session = Session::new(&index, cli.modifiers, cli.json);

    match cli.query {
        Some(query) => session.answer(&query, &mut out)?,
        None => {
            writeln!(out, "Indexed {num_pages} pages.")?;
            session.run(&mut input, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// An unreadable corpus indexes as zero pages.
fn index_corpus(path: &Path) -> (usize, InvertedIndex) {
    match load_corpus(path) {
        Ok((num_pages, index)) => {
            tracing::info!(num_pages, num_terms = index.num_terms(), corpus = %path.display(), "indexed corpus");
            (num_pages, index)
        }
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "could not read corpus, nothing to search");
            (0, InvertedIndex::new())
        }
    }
}
