//! Document records and per-language corpora.
//!
//! A corpus is the flat JSON array written by the extractor to
//! `assets/data/searchdata-<lang>.json` and read back by the browser runtime.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One extracted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Plain-text page title.
    pub title: String,

    /// Corpus-relative URL of the page (e.g. `./guide/battery.html`).
    pub url: String,

    /// Short summary from the page's meta description. May be empty.
    #[serde(default)]
    pub description: String,

    /// Normalized body text: whitespace collapsed, lower-cased.
    #[serde(default)]
    pub content: String,
}

impl DocumentRecord {
    /// Create a record from its four fields.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            content: content.into(),
        }
    }
}

/// All document records of one language, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    records: Vec<DocumentRecord>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a corpus from records.
    pub fn new(records: Vec<DocumentRecord>) -> Self {
        Self { records }
    }

    /// Parse a corpus from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a corpus file from disk.
    pub fn read_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write the corpus to disk, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// All records in corpus order.
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    /// Iterate over records in corpus order.
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<DocumentRecord> for Corpus {
    fn from_iter<I: IntoIterator<Item = DocumentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a DocumentRecord;
    type IntoIter = std::slice::Iter<'a, DocumentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Collapse whitespace runs to single spaces, trim, and lower-case.
///
/// This is the normalization applied to `content` at extraction time.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
