//! Snippet extraction from normalized page content.

use crate::query::Query;

/// Words per candidate window.
pub const WINDOW_WORDS: usize = 20;

/// A window may only start where at least this many words remain.
pub const MIN_TRAILING_WORDS: usize = 10;

/// Words shown when no window contains a keyword.
pub const FALLBACK_WORDS: usize = 15;

/// Character budget of the window text before the truncation marker.
pub const MAX_SNIPPET_CHARS: usize = 100;

/// Marker appended or prepended to cut text.
pub const ELLIPSIS: &str = "...";

/// Pick the excerpt of `content` that covers the most distinct keywords.
///
/// Ties keep the earliest window. Returns an empty string for empty content.
pub fn extract_snippet(content: &str, query: &Query) -> String {
    if content.is_empty() {
        return String::new();
    }

    let words: Vec<&str> = content.split_whitespace().collect();
    let mut keywords: Vec<&str> = query.keywords().iter().map(|k| k.as_str()).collect();
    keywords.sort_unstable();
    keywords.dedup();

    let mut best_start = 0;
    let mut max_matches = 0;

    if words.len() >= MIN_TRAILING_WORDS {
        for start in 0..=words.len() - MIN_TRAILING_WORDS {
            let end = (start + WINDOW_WORDS).min(words.len());
            let window = words[start..end].join(" ").to_lowercase();
            let matches = keywords.iter().filter(|k| window.contains(*k)).count();

            if matches > max_matches {
                max_matches = matches;
                best_start = start;
            }
        }
    }

    if max_matches == 0 {
        let mut snippet = words[..words.len().min(FALLBACK_WORDS)].join(" ");
        if words.len() > FALLBACK_WORDS {
            snippet.push_str(ELLIPSIS);
        }
        return snippet;
    }

    let end = (best_start + WINDOW_WORDS).min(words.len());
    let mut snippet = words[best_start..end].join(" ");

    if snippet.chars().count() > MAX_SNIPPET_CHARS {
        snippet = snippet.chars().take(MAX_SNIPPET_CHARS).collect();
        snippet.push_str(ELLIPSIS);
    }

    if best_start > 0 {
        snippet.insert_str(0, ELLIPSIS);
    }
    if best_start + WINDOW_WORDS < words.len() {
        snippet.push_str(ELLIPSIS);
    }

    snippet
}
