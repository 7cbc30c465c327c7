//! HTML fragments for the results page.

use crate::{location::link_with_param, score::SearchHit};

/// What the results page should show after a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// Empty query: clear the results and hide the placeholder.
    Cleared,

    /// No hits: clear the results and show the placeholder with `message`.
    NoResults {
        /// Placeholder markup echoing the query.
        message: String,
    },

    /// Hits: hide the placeholder and show `html` in the results container.
    Results {
        /// Number of hits rendered.
        count: usize,
        /// Results markup.
        html: String,
    },
}

/// Escape text for interpolation into HTML content or attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Decide what to show for `hits` of `query`.
///
/// `param` is the location parameter re-attached to every result link.
pub fn render(hits: &[SearchHit], query: &str, param: &str) -> Rendering {
    if hits.is_empty() {
        if query.is_empty() {
            return Rendering::Cleared;
        }
        return Rendering::NoResults {
            message: no_results_html(query),
        };
    }

    Rendering::Results {
        count: hits.len(),
        html: results_html(hits, query, param),
    }
}

/// Placeholder markup for a query without hits.
pub fn no_results_html(query: &str) -> String {
    format!(
        r#"<div class="p-search__no-results-content">
  <p class="p-search__no-results-text">No results found for "<strong>{}</strong>"</p>
  <p class="p-search__no-results-suggestion">Try using different keywords or check your spelling.</p>
</div>"#,
        escape_html(query)
    )
}

/// Results markup: a count header followed by one card per hit.
pub fn results_html(hits: &[SearchHit], query: &str, param: &str) -> String {
    let cards: String = hits.iter().map(|hit| result_card(hit, query, param)).collect();

    let for_query = if query.is_empty() {
        String::new()
    } else {
        format!(r#" for "<strong>{}</strong>""#, escape_html(query))
    };

    format!(
        r#"<div class="p-search__results-header">
  <p class="p-search__results-count">{} results found{}</p>
</div>
<div class="p-search__results-list">
{}</div>"#,
        hits.len(),
        for_query,
        cards
    )
}

fn result_card(hit: &SearchHit, query: &str, param: &str) -> String {
    let href = if query.is_empty() {
        hit.record.url.clone()
    } else {
        link_with_param(&hit.record.url, param, query)
    };

    let snippet = if hit.highlighted_snippet.is_empty() {
        String::new()
    } else {
        format!(
            "\n    <p class=\"p-search__result-snippet\">{}</p>",
            hit.highlighted_snippet
        )
    };

    format!(
        r#"  <div class="p-search__result-item">
    <h3 class="p-search__result-title">
      <a href="{}" class="p-search__result-link">{}</a>
    </h3>
    <p class="p-search__result-description">{}</p>{}
    <span class="p-search__result-url">{}</span>
  </div>
"#,
        escape_html(&href),
        hit.highlighted_title,
        hit.highlighted_description,
        snippet,
        escape_html(&hit.record.url)
    )
}
