//! Corpus loading.
//!
//! The browser fetches one corpus per page view, chosen by the language
//! segment of the page path. Any failure degrades to an empty corpus so search
//! simply finds nothing.

use handbook_core::{Corpus, SearchSettings, is_language_code};
use tracing::{error, info};

use crate::{Result, SearchError, location::Location};

/// Fetches corpus text.
///
/// Implemented over `gloo-net` in the browser and over the filesystem by the
/// CLI. Futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait CorpusFetcher {
    /// Fetch the body at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// First path segment that looks like `en-GB`, else `fallback`.
pub fn detect_language(path: &str, fallback: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .find(|segment| is_language_code(segment))
        .unwrap_or(fallback)
        .to_string()
}

/// Language of the page at `href`, else `fallback`.
pub fn language_for_href(href: &str, fallback: &str) -> String {
    match Location::parse(href) {
        Ok(location) => detect_language(location.path(), fallback),
        Err(_) => detect_language(href, fallback),
    }
}

/// Fetch and parse the corpus at `url`.
pub async fn fetch_corpus<F: CorpusFetcher>(fetcher: &F, url: &str) -> Result<Corpus> {
    let body = fetcher.fetch(url).await?;
    Corpus::from_json(&body).map_err(|e| SearchError::Parse(e.to_string()))
}

/// Fetch the corpus at `url`, logging failures and returning an empty corpus.
pub async fn load_corpus_from<F: CorpusFetcher>(fetcher: &F, url: &str) -> Corpus {
    match fetch_corpus(fetcher, url).await {
        Ok(corpus) => {
            info!(url, documents = corpus.len(), "Loaded search corpus");
            corpus
        }
        Err(e) => {
            error!(url, error = %e, "Failed to load search corpus");
            Corpus::empty()
        }
    }
}

/// Load the corpus for the page at `href`.
///
/// Exactly one fetch; no retry.
pub async fn load_corpus<F: CorpusFetcher>(
    fetcher: &F,
    href: &str,
    settings: &SearchSettings,
    fallback_language: &str,
) -> Corpus {
    let lang = language_for_href(href, fallback_language);
    let url = settings.corpus_path(&lang);
    load_corpus_from(fetcher, &url).await
}
