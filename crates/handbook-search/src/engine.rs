//! Search engine bound to one page.
//!
//! One engine is created per page load. It owns the corpus, the page handle,
//! and the debouncer for live search on the results page.

use std::{rc::Rc, time::Duration};

use handbook_core::{Corpus, SearchSettings};
use tracing::{debug, info, warn};

use crate::{
    location::{Location, search_page_link},
    query::Query,
    render::{Rendering, render},
    schedule::{Debouncer, Scheduler},
    score::{SearchHit, search},
};

/// The DOM surface the engine drives.
///
/// Elements that are absent on a given page turn the corresponding calls into
/// no-ops.
pub trait SearchPage {
    /// Current `window.location.href`.
    fn href(&self) -> String;

    /// Value of the query input, or `None` if the page has no input.
    fn query_input(&self) -> Option<String>;

    /// Set the query input's value.
    fn set_query_input(&self, value: &str);

    /// Whether the page has a results container.
    fn has_results_container(&self) -> bool;

    /// Replace the results container's markup.
    fn set_results_html(&self, html: &str);

    /// Show the "no results" placeholder with `message` markup.
    fn show_no_results(&self, message: &str);

    /// Hide the "no results" placeholder.
    fn hide_no_results(&self);

    /// Replace the current history entry's URL.
    fn replace_location(&self, href: &str);

    /// Navigate to `href`, which may be relative.
    fn navigate(&self, href: &str);
}

impl<T: SearchPage + ?Sized> SearchPage for Rc<T> {
    fn href(&self) -> String {
        (**self).href()
    }

    fn query_input(&self) -> Option<String> {
        (**self).query_input()
    }

    fn set_query_input(&self, value: &str) {
        (**self).set_query_input(value)
    }

    fn has_results_container(&self) -> bool {
        (**self).has_results_container()
    }

    fn set_results_html(&self, html: &str) {
        (**self).set_results_html(html)
    }

    fn show_no_results(&self, message: &str) {
        (**self).show_no_results(message)
    }

    fn hide_no_results(&self) {
        (**self).hide_no_results()
    }

    fn replace_location(&self, href: &str) {
        (**self).replace_location(href)
    }

    fn navigate(&self, href: &str) {
        (**self).navigate(href)
    }
}

/// What a search submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing happened (no input, or empty query off the results page).
    Ignored,
    /// Empty query on the results page: results cleared.
    Cleared,
    /// Results rendered in place.
    Rendered { count: usize },
    /// Navigated to the results page.
    Navigated(String),
}

/// Search engine bound to one page.
pub struct SearchEngine<P: SearchPage, S: Scheduler> {
    page: P,
    corpus: Corpus,
    settings: SearchSettings,
    is_search_page: bool,
    debouncer: Debouncer<S>,
}

impl<P: SearchPage + 'static, S: Scheduler + 'static> SearchEngine<P, S> {
    /// Bind an engine to `page`.
    pub fn new(page: P, corpus: Corpus, settings: SearchSettings, scheduler: S) -> Rc<Self> {
        let href = page.href();
        let is_search_page = match Location::parse(&href) {
            Ok(location) => location.is_page(&settings.page),
            Err(_) => href.contains(&settings.page),
        };
        let delay = Duration::from_millis(u64::from(settings.debounce_ms));

        info!(
            is_search_page,
            documents = corpus.len(),
            "Search engine bound"
        );

        Rc::new(Self {
            page,
            corpus,
            settings,
            is_search_page,
            debouncer: Debouncer::new(scheduler, delay),
        })
    }

    /// Whether this page is the dedicated results page.
    pub fn is_search_page(&self) -> bool {
        self.is_search_page
    }

    /// Whether input changes trigger debounced searches.
    pub fn live_search_enabled(&self) -> bool {
        self.is_search_page && self.page.query_input().is_some()
    }

    /// The page this engine drives.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// The loaded corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Input changed: schedule a live search on the results page.
    pub fn on_input(self: &Rc<Self>) {
        if !self.live_search_enabled() {
            return;
        }

        let engine = Rc::downgrade(self);
        self.debouncer.trigger(move || {
            if let Some(engine) = engine.upgrade() {
                engine.perform_search();
            }
        });
    }

    /// Key pressed in the input. Enter searches immediately.
    pub fn on_key(&self, key: &str) -> Option<Dispatch> {
        (key == "Enter").then(|| self.perform_search())
    }

    /// Apply a `q` parameter already present in the location.
    ///
    /// Fills the input; on the results page also searches.
    pub fn restore(&self) -> Option<Dispatch> {
        let location = Location::parse(&self.page.href()).ok()?;
        let query = location.param(&self.settings.param)?;
        self.page.query_input()?;

        debug!(query, "Restoring query from location");
        self.page.set_query_input(&query);

        self.is_search_page.then(|| self.perform_search())
    }

    /// Submit the current input.
    pub fn perform_search(&self) -> Dispatch {
        let Some(input) = self.page.query_input() else {
            return Dispatch::Ignored;
        };
        let raw = input.trim();

        if raw.is_empty() {
            if self.is_search_page {
                self.apply(&Rendering::Cleared);
                return Dispatch::Cleared;
            }
            return Dispatch::Ignored;
        }

        if !self.is_search_page {
            let target = search_page_link(&self.settings.page, &self.settings.param, raw);
            self.page.navigate(&target);
            return Dispatch::Navigated(target);
        }

        let query = Query::parse(raw);
        let hits = self.search(&query);
        self.apply(&render(&hits, query.raw(), &self.settings.param));

        match Location::parse(&self.page.href()) {
            Ok(location) => self
                .page
                .replace_location(&location.with_param(&self.settings.param, raw)),
            Err(e) => warn!(error = %e, "Cannot update location with query"),
        }

        Dispatch::Rendered { count: hits.len() }
    }

    /// Run a query against the corpus.
    pub fn search(&self, query: &Query) -> Vec<SearchHit> {
        search(&self.corpus, query)
    }

    fn apply(&self, rendering: &Rendering) {
        if !self.page.has_results_container() {
            return;
        }

        match rendering {
            Rendering::Cleared => {
                self.page.set_results_html("");
                self.page.hide_no_results();
            }
            Rendering::NoResults { message } => {
                self.page.set_results_html("");
                self.page.show_no_results(message);
            }
            Rendering::Results { html, .. } => {
                self.page.hide_no_results();
                self.page.set_results_html(html);
            }
        }
    }
}
