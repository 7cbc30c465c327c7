//! Keyword highlighting.
//!
//! Each keyword is one pass over the current text, in query order. Later
//! passes see the markup inserted by earlier ones, so overlapping keywords can
//! be wrapped twice; that output is kept as-is. Entities in the escaped text
//! are never matched, so highlighting cannot split `&amp;` and friends.

use regex::Captures;

use crate::query::{Keyword, Query};

/// Wrapper put around each match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    open: String,
    close: &'static str,
}

impl Marker {
    /// `<mark>…</mark>`, used in search results.
    pub fn plain() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>",
        }
    }

    /// `<mark class="…">…</mark>`, used on rendered pages.
    pub fn with_class(class: &str) -> Self {
        Self {
            open: format!("<mark class=\"{class}\">"),
            close: "</mark>",
        }
    }

    fn wrap(&self, text: &str) -> String {
        format!("{}{}{}", self.open, text, self.close)
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::plain()
    }
}

/// Ordered list of highlight passes, one per keyword.
#[derive(Debug, Clone, Copy)]
pub struct HighlightPasses<'q> {
    keywords: &'q [Keyword],
}

impl<'q> HighlightPasses<'q> {
    /// Passes for every keyword of `query`, duplicates included.
    pub fn for_query(query: &'q Query) -> Self {
        Self {
            keywords: query.keywords(),
        }
    }

    /// Run every pass over `escaped`, which must already be HTML-escaped.
    pub fn apply(&self, escaped: &str, marker: &Marker) -> String {
        self.keywords
            .iter()
            .fold(escaped.to_string(), |text, keyword| {
                keyword
                    .markup_pattern()
                    .replace_all(&text, |caps: &Captures<'_>| match caps.get(1) {
                        Some(found) => marker.wrap(found.as_str()),
                        None => caps[0].to_string(),
                    })
                    .into_owned()
            })
    }
}

/// Highlight every keyword of `query` in HTML-escaped `escaped` text.
pub fn highlight(escaped: &str, query: &Query, marker: &Marker) -> String {
    HighlightPasses::for_query(query).apply(escaped, marker)
}
