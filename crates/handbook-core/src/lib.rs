//! Handbook Core Library
//!
//! Core types, configuration, and error handling shared by the Handbook search
//! runtime, the corpus extractor, and the CLI.

pub mod config;
pub mod document;
pub mod error;
pub mod lang;

pub use config::{Config, ExtractConfig, SearchSettings, SiteConfig};
pub use document::{Corpus, DocumentRecord, normalize_text};
pub use error::{CoreError, Result};
pub use lang::is_language_code;
