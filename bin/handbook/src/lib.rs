//! Handbook CLI Library
//!
//! Host-side tooling for the manual search: corpus extraction from the
//! rendered site, corpus queries from the terminal, site checks, and a local
//! preview server.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (extract, search, check, serve)
//! - [`server`] - Static preview server
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use handbook::cmd;
//!
//! // Regenerate every language's corpus under ./dist
//! cmd::extract::run(Path::new("handbook.toml"), None).unwrap();
//! ```

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use handbook_core::{Config, Corpus, DocumentRecord};
pub use handbook_extract::{ExtractStats, Extractor};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// handbook::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
