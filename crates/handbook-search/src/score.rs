//! Linear scoring and result assembly.
//!
//! Every search rescans the whole corpus. A record's score is the sum over
//! keywords of weighted occurrence counts in its title, description and
//! content; records scoring zero are dropped.

use handbook_core::{Corpus, DocumentRecord};
use serde::Serialize;
use tracing::debug;

use crate::{
    highlight::{HighlightPasses, Marker},
    query::Query,
    render::escape_html,
    snippet::extract_snippet,
};

/// Weight of one title occurrence.
pub const TITLE_WEIGHT: u32 = 10;

/// Weight of one description occurrence.
pub const DESCRIPTION_WEIGHT: u32 = 5;

/// Weight of one content occurrence.
pub const CONTENT_WEIGHT: u32 = 1;

/// A matching record with its score and highlighted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// The matching record.
    #[serde(flatten)]
    pub record: DocumentRecord,

    /// Relevance score (higher is better).
    pub score: u32,

    /// Escaped title with highlight markup.
    pub highlighted_title: String,

    /// Escaped description with highlight markup.
    pub highlighted_description: String,

    /// Escaped content excerpt with highlight markup; empty when the record
    /// has no content.
    pub highlighted_snippet: String,
}

/// Score one record against a query.
pub fn score_record(record: &DocumentRecord, query: &Query) -> u32 {
    query
        .keywords()
        .iter()
        .map(|keyword| {
            let title = keyword.count_in(&record.title) as u32;
            let description = keyword.count_in(&record.description) as u32;
            let content = keyword.count_in(&record.content) as u32;

            TITLE_WEIGHT * title + DESCRIPTION_WEIGHT * description + CONTENT_WEIGHT * content
        })
        .sum()
}

/// Search the corpus.
///
/// Returns every record with a positive score, best first. Equal scores keep
/// corpus order.
pub fn search(corpus: &Corpus, query: &Query) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }

    let passes = HighlightPasses::for_query(query);
    let marker = Marker::plain();

    let mut hits: Vec<SearchHit> = corpus
        .iter()
        .filter_map(|record| {
            let score = score_record(record, query);
            if score == 0 {
                return None;
            }

            let snippet = extract_snippet(&record.content, query);
            let highlighted_snippet = if snippet.is_empty() {
                String::new()
            } else {
                passes.apply(&escape_html(&snippet), &marker)
            };

            Some(SearchHit {
                record: record.clone(),
                score,
                highlighted_title: passes.apply(&escape_html(&record.title), &marker),
                highlighted_description: passes
                    .apply(&escape_html(&record.description), &marker),
                highlighted_snippet,
            })
        })
        .collect();

    // Stable: ties keep corpus order.
    hits.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        query = query.raw(),
        documents = corpus.len(),
        hits = hits.len(),
        "Search completed"
    );

    hits
}
