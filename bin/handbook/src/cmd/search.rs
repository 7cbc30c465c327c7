//! Search command - query a corpus file from the terminal

use std::{fmt::Write, path::Path};

use color_eyre::eyre::Result;
use handbook_search::{
    CorpusFetcher, Query, Rendering, SearchError, SearchHit, extract_snippet, load_corpus_from,
    render, search,
};

use super::load_config;

/// Reads corpus files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFetcher;

impl CorpusFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> handbook_search::Result<String> {
        tokio::fs::read_to_string(url)
            .await
            .map_err(|e| SearchError::Fetch(format!("{url}: {e}")))
    }
}

/// Run the search command.
///
/// Loads the corpus the way the browser does: a missing or malformed file
/// searches as an empty corpus.
pub async fn run(
    config_path: &Path,
    corpus: &Path,
    query: &str,
    limit: Option<usize>,
    html: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let corpus = load_corpus_from(&FileFetcher, &corpus.to_string_lossy()).await;

    let query = Query::parse(query);
    let hits = search(&corpus, &query);
    tracing::info!(query = query.raw(), hits = hits.len(), "Search finished");

    if html {
        println!("{}", fragment(&hits, &query, &config.search.param));
    } else {
        print!("{}", format_hits(&hits, &query, limit));
    }

    Ok(())
}

/// The markup the results page would show.
pub fn fragment(hits: &[SearchHit], query: &Query, param: &str) -> String {
    match render(hits, query.raw(), param) {
        Rendering::Cleared => String::new(),
        Rendering::NoResults { message } => message,
        Rendering::Results { html, .. } => html,
    }
}

/// Plain-text listing of `hits`, best first.
pub fn format_hits(hits: &[SearchHit], query: &Query, limit: Option<usize>) -> String {
    let mut out = String::new();

    if hits.is_empty() {
        let _ = writeln!(out, "No results found for \"{}\"", query.raw());
        return out;
    }

    let shown = limit.unwrap_or(hits.len()).min(hits.len());
    let _ = writeln!(
        out,
        "{} results found for \"{}\" (showing {shown})",
        hits.len(),
        query.raw()
    );

    for hit in &hits[..shown] {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {:>5}  {}", hit.score, hit.record.title);
        let _ = writeln!(out, "         {}", hit.record.url);

        let snippet = extract_snippet(&hit.record.content, query);
        if !snippet.is_empty() {
            let _ = writeln!(out, "         {snippet}");
        }
    }

    out
}
