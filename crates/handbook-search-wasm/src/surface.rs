//! Rendered page text, walked with a `TreeWalker`.

use handbook_search::TextSurface;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Node, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Text,
};

/// `NodeFilter.SHOW_TEXT`.
const SHOW_TEXT: u32 = 0x4;

/// Text of the current document.
pub struct DomSurface {
    document: Document,
    highlight_class: String,
}

impl DomSurface {
    pub fn new(document: Document, highlight_class: &str) -> Self {
        Self {
            document,
            highlight_class: highlight_class.to_string(),
        }
    }

    fn root(&self, selector: &str) -> Option<Node> {
        match self.document.query_selector(selector).ok().flatten() {
            Some(el) => Some(el.into()),
            None => self.document.body().map(Into::into),
        }
    }
}

impl TextSurface for DomSurface {
    type Node = Text;
    type Mark = Element;

    fn text_nodes(&self, root_selector: &str) -> Vec<Text> {
        let Some(root) = self.root(root_selector) else {
            return Vec::new();
        };
        let walker = match self
            .document
            .create_tree_walker_with_what_to_show(&root, SHOW_TEXT)
        {
            Ok(walker) => walker,
            Err(e) => {
                warn!(error = ?e, "createTreeWalker failed");
                return Vec::new();
            }
        };

        // Collected up front: replacing nodes while walking would derail it.
        let mut nodes = Vec::new();
        while let Ok(Some(node)) = walker.next_node() {
            if let Ok(text) = node.dyn_into::<Text>() {
                nodes.push(text);
            }
        }
        nodes
    }

    fn parent_tag(&self, node: &Text) -> Option<String> {
        node.parent_element().map(|parent| parent.tag_name().to_lowercase())
    }

    fn node_text(&self, node: &Text) -> String {
        node.text_content().unwrap_or_default()
    }

    fn replace_with_markup(&self, node: &Text, markup: &str) -> Option<Element> {
        let parent = node.parent_node()?;
        let wrapper = self.document.create_element("span").ok()?;
        wrapper.set_inner_html(markup);

        if let Err(e) = parent.replace_child(&wrapper, node) {
            warn!(error = ?e, "Failed to replace text node");
            return None;
        }

        wrapper
            .query_selector(&format!(".{}", self.highlight_class))
            .ok()
            .flatten()
    }

    fn scroll_into_view(&self, mark: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        mark.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
