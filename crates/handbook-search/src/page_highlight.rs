//! Highlighting on rendered pages.
//!
//! A page opened with a query parameter (usually from a result link) gets
//! every keyword occurrence in its main content marked, then scrolls the
//! first mark into view once layout has settled. Runs once per page load.

use std::{rc::Rc, time::Duration};

use handbook_core::SearchSettings;
use tracing::debug;

use crate::{
    highlight::{HighlightPasses, Marker},
    location::Location,
    query::Query,
    render::escape_html,
    schedule::Scheduler,
};

/// Parent tags whose text is never highlighted.
const SKIPPED_PARENTS: &[&str] = &["script", "style"];

/// The rendered text of a page.
pub trait TextSurface {
    /// A text node.
    type Node;
    /// An inserted highlight element.
    type Mark: 'static;

    /// Text nodes under the first element matching `root_selector`, or under
    /// the whole body if none matches, in document order.
    fn text_nodes(&self, root_selector: &str) -> Vec<Self::Node>;

    /// Lower-case tag name of the node's parent element.
    fn parent_tag(&self, node: &Self::Node) -> Option<String>;

    /// The node's text content.
    fn node_text(&self, node: &Self::Node) -> String;

    /// Replace `node` with a wrapper holding `markup`. Returns the first
    /// inserted highlight, if any.
    fn replace_with_markup(&self, node: &Self::Node, markup: &str) -> Option<Self::Mark>;

    /// Smoothly scroll `mark` to the centre of the viewport.
    fn scroll_into_view(&self, mark: &Self::Mark);
}

/// Outcome of [`highlight_page`].
pub struct PageHighlight<H> {
    /// Text nodes that were replaced.
    pub nodes: usize,
    /// Pending scroll to the first highlight.
    pub scroll: Option<H>,
}

impl<H> PageHighlight<H> {
    /// Whether anything was highlighted.
    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }
}

/// Highlight the query carried by `href` on `surface`.
///
/// Returns `None` when the location has no query parameter.
pub fn highlight_page<T, S>(
    surface: Rc<T>,
    href: &str,
    settings: &SearchSettings,
    scheduler: &S,
) -> Option<PageHighlight<S::Handle>>
where
    T: TextSurface + 'static,
    S: Scheduler,
{
    let raw = Location::parse(href).ok()?.param(&settings.param)?;
    let query = Query::parse(&raw);
    let passes = HighlightPasses::for_query(&query);
    let marker = Marker::with_class(&settings.highlight_class);

    let mut nodes = 0;
    let mut first = None;

    for node in surface.text_nodes(&settings.content_selector) {
        let skipped = surface
            .parent_tag(&node)
            .is_some_and(|tag| SKIPPED_PARENTS.contains(&tag.as_str()));
        if skipped {
            continue;
        }

        let text = surface.node_text(&node);
        if !query.keywords().iter().any(|keyword| keyword.is_match(&text)) {
            continue;
        }

        let markup = passes.apply(&escape_html(&text), &marker);
        let mark = surface.replace_with_markup(&node, &markup);
        nodes += 1;
        if first.is_none() {
            first = mark;
        }
    }

    debug!(query = %raw, nodes, "Highlighted page");

    let scroll = first.map(|mark| {
        let surface = Rc::clone(&surface);
        scheduler.schedule(
            Duration::from_millis(u64::from(settings.scroll_delay_ms)),
            Box::new(move || surface.scroll_into_view(&mark)),
        )
    });

    Some(PageHighlight { nodes, scroll })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::schedule::manual::ManualScheduler;

    struct FakeSurface {
        nodes: Vec<(&'static str, &'static str)>,
        roots: RefCell<Vec<String>>,
        replaced: RefCell<Vec<(usize, String)>>,
        scrolled: RefCell<Vec<usize>>,
    }

    impl FakeSurface {
        fn new(nodes: Vec<(&'static str, &'static str)>) -> Rc<Self> {
            Rc::new(Self {
                nodes,
                roots: RefCell::new(Vec::new()),
                replaced: RefCell::new(Vec::new()),
                scrolled: RefCell::new(Vec::new()),
            })
        }
    }

    impl TextSurface for FakeSurface {
        type Node = usize;
        type Mark = usize;

        fn text_nodes(&self, root_selector: &str) -> Vec<usize> {
            self.roots.borrow_mut().push(root_selector.to_string());
            (0..self.nodes.len()).collect()
        }

        fn parent_tag(&self, node: &usize) -> Option<String> {
            Some(self.nodes[*node].0.to_string())
        }

        fn node_text(&self, node: &usize) -> String {
            self.nodes[*node].1.to_string()
        }

        fn replace_with_markup(&self, node: &usize, markup: &str) -> Option<usize> {
            self.replaced.borrow_mut().push((*node, markup.to_string()));
            markup.contains("<mark").then_some(*node)
        }

        fn scroll_into_view(&self, mark: &usize) {
            self.scrolled.borrow_mut().push(*mark);
        }
    }

    const PAGE: &str = "https://manual.example/en-GB/battery.html";

    #[test]
    fn test_without_query_does_nothing() {
        let surface = FakeSurface::new(vec![("p", "battery")]);
        let scheduler = ManualScheduler::new();

        let result = highlight_page(
            Rc::clone(&surface),
            PAGE,
            &SearchSettings::default(),
            &scheduler,
        );

        assert!(result.is_none());
        assert!(surface.roots.borrow().is_empty());
    }

    #[test]
    fn test_highlights_matching_nodes_and_scrolls_to_first() {
        let surface = FakeSurface::new(vec![
            ("h1", "Battery Replacement"),
            ("p", "Nothing here"),
            ("script", "var battery = 1;"),
            ("li", "Charge the battery <fully>"),
        ]);
        let scheduler = ManualScheduler::new();
        let href = format!("{PAGE}?q=battery");

        let result = highlight_page(
            Rc::clone(&surface),
            &href,
            &SearchSettings::default(),
            &scheduler,
        )
        .expect("query present");

        assert_eq!(result.nodes, 2);
        assert!(result.scroll.is_some());
        assert_eq!(*surface.roots.borrow(), vec![".p-main__content"]);

        let replaced = surface.replaced.borrow();
        assert_eq!(replaced[0].0, 0);
        assert_eq!(
            replaced[0].1,
            "<mark class=\"search-highlight\">Battery</mark> Replacement"
        );
        assert_eq!(replaced[1].0, 3);
        assert_eq!(
            replaced[1].1,
            "Charge the <mark class=\"search-highlight\">battery</mark> &lt;fully&gt;"
        );

        scheduler.advance(Duration::from_millis(99));
        assert!(surface.scrolled.borrow().is_empty());
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*surface.scrolled.borrow(), vec![0]);
    }

    #[test]
    fn test_style_text_is_skipped() {
        let surface = FakeSurface::new(vec![("style", ".battery { color: red }")]);
        let scheduler = ManualScheduler::new();

        let result = highlight_page(
            Rc::clone(&surface),
            &format!("{PAGE}?q=battery"),
            &SearchSettings::default(),
            &scheduler,
        )
        .expect("query present");

        assert!(result.is_empty());
        assert!(result.scroll.is_none());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_escaped_page_text_keeps_entities() {
        let surface = FakeSurface::new(vec![("p", "Salt & pepper <to taste>")]);
        let scheduler = ManualScheduler::new();

        highlight_page(
            Rc::clone(&surface),
            &format!("{PAGE}?q=a"),
            &SearchSettings::default(),
            &scheduler,
        )
        .expect("query present");

        let replaced = surface.replaced.borrow();
        assert_eq!(
            replaced[0].1,
            "S<mark class=\"search-highlight\">a</mark>lt &amp; pepper \
             &lt;to t<mark class=\"search-highlight\">a</mark>ste&gt;"
        );
    }

    #[test]
    fn test_multiple_keywords_in_one_node() {
        let surface = FakeSurface::new(vec![("p", "Reset the Wi-Fi module")]);
        let scheduler = ManualScheduler::new();

        highlight_page(
            Rc::clone(&surface),
            &format!("{PAGE}?q=wi-fi+reset"),
            &SearchSettings::default(),
            &scheduler,
        )
        .expect("query present");

        let replaced = surface.replaced.borrow();
        assert_eq!(replaced.len(), 1);
        assert_eq!(
            replaced[0].1,
            "<mark class=\"search-highlight\">Reset</mark> the \
             <mark class=\"search-highlight\">Wi-Fi</mark> module"
        );
    }
}
