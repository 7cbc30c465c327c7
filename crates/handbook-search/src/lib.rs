//! Handbook Search Library
//!
//! Client-side search for the multi-language product manual: corpus loading,
//! linear scoring, snippet selection, keyword highlighting, results rendering,
//! and the page wiring that ties them to the query input and location.
//!
//! Everything here is platform-neutral. The DOM, timers and network live
//! behind small traits ([`SearchPage`], [`TextSurface`], [`Scheduler`],
//! [`CorpusFetcher`]) implemented by `handbook-search-wasm` in the browser and
//! by fakes in tests.
//!
//! # Example
//!
//! ```
//! use handbook_core::{Corpus, DocumentRecord};
//! use handbook_search::{Query, search};
//!
//! let corpus = Corpus::new(vec![DocumentRecord::new(
//!     "Battery Replacement",
//!     "./battery.html",
//!     "",
//!     "replace the battery every two years",
//! )]);
//!
//! let hits = search(&corpus, &Query::parse("battery"));
//! assert_eq!(hits[0].score, 11);
//! ```

pub mod engine;
pub mod highlight;
pub mod loader;
pub mod location;
pub mod page_highlight;
pub mod query;
pub mod render;
pub mod schedule;
pub mod score;
pub mod snippet;

pub use engine::{Dispatch, SearchEngine, SearchPage};
pub use highlight::{HighlightPasses, Marker, highlight};
pub use loader::{CorpusFetcher, detect_language, load_corpus, load_corpus_from};
pub use location::Location;
pub use page_highlight::{PageHighlight, TextSurface, highlight_page};
pub use query::{Keyword, Query};
pub use render::{Rendering, escape_html, render};
pub use schedule::{Debouncer, Scheduler, TaskHandle, manual::ManualScheduler};
pub use score::{SearchHit, score_record, search};
pub use snippet::extract_snippet;
use thiserror::Error;

/// Search-related errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The corpus request could not be made or its body read.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The corpus body is not a valid corpus.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The page location is not a valid URL.
    #[error("Location error: {0}")]
    Location(String),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
