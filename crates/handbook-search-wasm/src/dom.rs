//! DOM bindings for the search input, results container and placeholder.

use handbook_core::SearchSettings;
use handbook_search::SearchPage;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

/// The search widgets found on the current page.
///
/// Any of them may be missing; content pages usually only carry the input.
pub struct DomPage {
    window: Window,
    input: Option<HtmlInputElement>,
    results: Option<Element>,
    no_results: Option<HtmlElement>,
}

impl DomPage {
    /// Look up the widgets named by `settings`.
    pub fn bind(window: Window, document: &Document, settings: &SearchSettings) -> Self {
        let input = select(document, &settings.input_selector)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let results = select(document, &settings.results_selector);
        let no_results = select(document, &settings.no_results_selector)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        Self {
            window,
            input,
            results,
            no_results,
        }
    }

    /// The query input, if present.
    pub fn input(&self) -> Option<&HtmlInputElement> {
        self.input.as_ref()
    }

    fn set_placeholder_display(&self, display: &str) {
        if let Some(el) = &self.no_results {
            if let Err(e) = el.style().set_property("display", display) {
                warn!(error = ?e, "Failed to toggle no-results placeholder");
            }
        }
    }
}

fn select(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

impl SearchPage for DomPage {
    fn href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn query_input(&self) -> Option<String> {
        self.input.as_ref().map(HtmlInputElement::value)
    }

    fn set_query_input(&self, value: &str) {
        if let Some(input) = &self.input {
            input.set_value(value);
        }
    }

    fn has_results_container(&self) -> bool {
        self.results.is_some()
    }

    fn set_results_html(&self, html: &str) {
        if let Some(results) = &self.results {
            results.set_inner_html(html);
        }
    }

    fn show_no_results(&self, message: &str) {
        if let Some(el) = &self.no_results {
            el.set_inner_html(message);
        }
        self.set_placeholder_display("block");
    }

    fn hide_no_results(&self) {
        self.set_placeholder_display("none");
    }

    fn replace_location(&self, href: &str) {
        let replaced = self
            .window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(href)));
        if let Err(e) = replaced {
            warn!(href, error = ?e, "history.replaceState failed");
        }
    }

    fn navigate(&self, href: &str) {
        if let Err(e) = self.window.location().set_href(href) {
            warn!(href, error = ?e, "Navigation failed");
        }
    }
}
