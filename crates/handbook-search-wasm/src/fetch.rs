//! Corpus fetching over `fetch()`.

use gloo_net::http::Request;
use handbook_search::{CorpusFetcher, Result, SearchError};

/// Fetches corpus files relative to the current page.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooFetcher;

impl CorpusFetcher for GlooFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| SearchError::Fetch(format!("Network error: {e}")))?;

        if !response.ok() {
            return Err(SearchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::Fetch(format!("Failed to read response: {e}")))
    }
}
