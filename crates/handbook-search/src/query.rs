//! Query parsing.
//!
//! A query is split on whitespace into lower-cased keywords. Each keyword
//! carries two compiled case-insensitive literal patterns: one for plain text
//! and one for HTML-escaped text, so highlighting can run over escaped markup
//! without breaking the entities the escaping produced.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::render::escape_html;

/// One lower-cased query keyword with its literal patterns.
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    pattern: Regex,
    markup_pattern: Regex,
}

impl Keyword {
    /// Compile a keyword. Pattern-special characters are escaped.
    pub fn new(text: &str) -> Result<Self, regex::Error> {
        let text = text.to_lowercase();
        let pattern = literal_pattern(&text)?;
        let markup_pattern = markup_pattern(&text)?;

        Ok(Self {
            text,
            pattern,
            markup_pattern,
        })
    }

    /// The lower-cased keyword.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of non-overlapping case-insensitive occurrences in `haystack`.
    pub fn count_in(&self, haystack: &str) -> usize {
        self.pattern.find_iter(haystack).count()
    }

    /// Whether the keyword occurs in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern.is_match(haystack)
    }

    /// Pattern for HTML-escaped text.
    ///
    /// Group 1 is a keyword occurrence; group 2 is an entity produced by
    /// [`escape_html`] that must be passed through untouched. The keyword is
    /// tried first so keywords containing `&`, `<` or quotes still match.
    pub(crate) fn markup_pattern(&self) -> &Regex {
        &self.markup_pattern
    }
}

/// Entities emitted by [`escape_html`].
const ESCAPED_ENTITIES: &str = "&(?:amp|lt|gt|quot|#x27);";

fn markup_pattern(text: &str) -> Result<Regex, regex::Error> {
    let keyword = regex::escape(&escape_html(text));
    RegexBuilder::new(&format!("({keyword})|({ESCAPED_ENTITIES})"))
        .case_insensitive(true)
        .build()
}

fn literal_pattern(text: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
}

/// A parsed search query.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    keywords: Vec<Keyword>,
}

impl Query {
    /// Parse a query string.
    ///
    /// The raw text is trimmed; keywords keep their order and duplicates.
    pub fn parse(query: &str) -> Self {
        let raw = query.trim().to_string();
        let keywords = tokenize(&raw)
            .filter_map(|word| match Keyword::new(word) {
                Ok(keyword) => Some(keyword),
                Err(error) => {
                    warn!(word, %error, "Dropping keyword that cannot be compiled");
                    None
                }
            })
            .collect();

        Self { raw, keywords }
    }

    /// The trimmed query text as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Keywords in query order.
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Check if the query has no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Split a query into whitespace-separated words, dropping empty ones.
pub fn tokenize(query: &str) -> impl Iterator<Item = &str> {
    query.split_whitespace()
}
