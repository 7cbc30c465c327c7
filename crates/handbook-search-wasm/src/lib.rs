//! Handbook Search WASM Runtime
//!
//! Browser side of the manual search. On load it highlights any `?q=` query
//! in the page content, fetches the corpus for the page language, and wires
//! the search input: Enter submits everywhere, typing searches live on the
//! results page.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { HandbookSearch } from 'handbook-search-wasm';
//!
//! await init(); // also wires the current page
//!
//! const search = await HandbookSearch.load('./assets/data/searchdata-en-GB.json');
//! const hits = search.search('battery');
//! console.log(hits[0].score, hits[0].highlightedTitle);
//! ```

pub mod dom;
pub mod fetch;
pub mod mount;
pub mod surface;
pub mod timer;

pub use dom::DomPage;
pub use fetch::GlooFetcher;
use handbook_core::Corpus;
use handbook_search::{Query, Rendering, loader::fetch_corpus, render, search};
pub use mount::{boot, mount};
use serde::Serialize;
pub use surface::DomSurface;
pub use timer::{TimeoutHandle, TimeoutScheduler};
use tracing::{debug, error};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module and wire the current page.
///
/// Sets up the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = boot() {
        error!(error = ?e, "Search startup failed");
    }
}

/// Get the version of the search library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// A loaded corpus, searchable from JavaScript.
#[wasm_bindgen]
pub struct HandbookSearch {
    corpus: Corpus,
}

#[wasm_bindgen]
impl HandbookSearch {
    /// Load a corpus from a URL.
    #[wasm_bindgen(js_name = load)]
    pub async fn load(url: &str) -> Result<HandbookSearch, JsValue> {
        let corpus = fetch_corpus(&GlooFetcher, url)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { corpus })
    }

    /// Create from a JSON string (for testing).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<HandbookSearch, JsValue> {
        let corpus = Corpus::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse corpus: {e}")))?;
        Ok(Self { corpus })
    }

    /// Ranked hits as plain objects.
    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        #[cfg(target_arch = "wasm32")]
        let start = js_sys::Date::now();

        let hits = search(&self.corpus, &Query::parse(query));

        #[cfg(target_arch = "wasm32")]
        debug!(query, elapsed_ms = js_sys::Date::now() - start, "Search finished");
        #[cfg(not(target_arch = "wasm32"))]
        debug!(query, "Search finished");

        hits.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Markup for the results container, or the no-results message.
    ///
    /// Empty for an empty query.
    pub fn render(&self, query: &str, param: Option<String>) -> String {
        let query = Query::parse(query);
        let hits = search(&self.corpus, &query);
        let param = param.unwrap_or_else(|| "q".to_string());

        match render(&hits, query.raw(), &param) {
            Rendering::Cleared => String::new(),
            Rendering::NoResults { message } => message,
            Rendering::Results { html, .. } => html,
        }
    }

    /// Get the number of loaded documents.
    #[wasm_bindgen(js_name = documentCount)]
    pub fn document_count(&self) -> usize {
        self.corpus.len()
    }
}
