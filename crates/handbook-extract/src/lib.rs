//! Handbook Extract Library
//!
//! Turns a rendered manual site into the per-language search corpora read by
//! the browser search.
//!
//! # Modules
//!
//! - [`page`] - Title, description and main-content extraction from one page
//! - [`site`] - Language discovery, page collection and corpus output

pub mod page;
pub mod site;

use std::path::PathBuf;

use handbook_core::CoreError;
pub use page::PageExtractor;
pub use site::{ExtractStats, Extractor, LanguageStats};
use thiserror::Error;

/// Extraction errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The site directory does not exist.
    #[error("site directory not found: {0} (build the site first)")]
    SiteNotFound(PathBuf),

    /// The site directory has no language directories.
    #[error("no language directories in {0}")]
    NoLanguages(PathBuf),

    /// A configured CSS selector does not parse.
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus output error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;
