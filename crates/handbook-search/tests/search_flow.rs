//! End-to-end search flow: corpus JSON through loading, ranking and rendering.

use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use futures::executor::block_on;
use handbook_core::SearchSettings;
use handbook_search::{
    CorpusFetcher, Dispatch, ManualScheduler, Query, SearchEngine, SearchError, SearchPage,
    load_corpus, search,
};

const CORPUS_EN: &str = r#"[
  {
    "title": "Battery Replacement",
    "url": "./maintenance/battery.html",
    "description": "",
    "content": "replace the battery every two years"
  },
  {
    "title": "Charging",
    "url": "./charging.html",
    "description": "Charging the battery safely",
    "content": "use the supplied cable to charge the battery"
  },
  {
    "title": "Safety",
    "url": "./safety.html",
    "description": "General safety notes",
    "content": "keep the device dry"
  }
]"#;

struct SiteFetcher {
    files: HashMap<&'static str, &'static str>,
}

impl SiteFetcher {
    fn new() -> Self {
        Self {
            files: HashMap::from([("./assets/data/searchdata-en-GB.json", CORPUS_EN)]),
        }
    }
}

impl CorpusFetcher for SiteFetcher {
    async fn fetch(&self, url: &str) -> handbook_search::Result<String> {
        self.files
            .get(url)
            .map(|body| body.to_string())
            .ok_or_else(|| SearchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[derive(Default)]
struct Page {
    href: RefCell<String>,
    input: RefCell<String>,
    results: RefCell<String>,
    placeholder: RefCell<Option<String>>,
    navigated: RefCell<Option<String>>,
}

impl SearchPage for Page {
    fn href(&self) -> String {
        self.href.borrow().clone()
    }

    fn query_input(&self) -> Option<String> {
        Some(self.input.borrow().clone())
    }

    fn set_query_input(&self, value: &str) {
        *self.input.borrow_mut() = value.to_string();
    }

    fn has_results_container(&self) -> bool {
        true
    }

    fn set_results_html(&self, html: &str) {
        *self.results.borrow_mut() = html.to_string();
    }

    fn show_no_results(&self, message: &str) {
        *self.placeholder.borrow_mut() = Some(message.to_string());
    }

    fn hide_no_results(&self) {
        *self.placeholder.borrow_mut() = None;
    }

    fn replace_location(&self, href: &str) {
        *self.href.borrow_mut() = href.to_string();
    }

    fn navigate(&self, href: &str) {
        *self.navigated.borrow_mut() = Some(href.to_string());
    }
}

fn page(href: &str) -> Rc<Page> {
    let page = Page::default();
    *page.href.borrow_mut() = href.to_string();
    Rc::new(page)
}

#[test]
fn test_battery_scenario_scores_eleven() {
    let corpus = block_on(load_corpus(
        &SiteFetcher::new(),
        "https://manual.example/en-GB/search.html",
        &SearchSettings::default(),
        "en-GB",
    ));
    assert_eq!(corpus.len(), 3);

    let hits = search(&corpus, &Query::parse("battery"));
    let scores: Vec<(&str, u32)> = hits
        .iter()
        .map(|hit| (hit.record.title.as_str(), hit.score))
        .collect();

    // Charging: description 5 + content 1.
    assert_eq!(scores, vec![("Battery Replacement", 11), ("Charging", 6)]);
    assert!(hits[0].highlighted_snippet.contains("<mark>battery</mark>"));
}

#[test]
fn test_unknown_language_falls_back_to_empty_results() {
    let corpus = block_on(load_corpus(
        &SiteFetcher::new(),
        "https://manual.example/fr-FR/search.html",
        &SearchSettings::default(),
        "en-GB",
    ));
    assert!(corpus.is_empty());
    assert!(search(&corpus, &Query::parse("battery")).is_empty());
}

#[test]
fn test_result_link_round_trip() {
    let settings = SearchSettings::default();
    let corpus = block_on(load_corpus(
        &SiteFetcher::new(),
        "https://manual.example/en-GB/index.html",
        &settings,
        "en-GB",
    ));

    // Submit from a content page: navigate to the results page.
    let content_page = page("https://manual.example/en-GB/index.html");
    let engine = SearchEngine::new(
        Rc::clone(&content_page),
        corpus.clone(),
        settings.clone(),
        ManualScheduler::new(),
    );
    content_page.set_query_input("dry device");
    assert_eq!(
        engine.on_key("Enter"),
        Some(Dispatch::Navigated("./search.html?q=dry%20device".to_string()))
    );

    // Land on the results page with the query restored.
    let results_page = page("https://manual.example/en-GB/search.html?q=dry%20device");
    let engine = SearchEngine::new(
        Rc::clone(&results_page),
        corpus,
        settings,
        ManualScheduler::new(),
    );
    assert_eq!(engine.restore(), Some(Dispatch::Rendered { count: 1 }));
    assert_eq!(*results_page.input.borrow(), "dry device");
    assert!(
        results_page
            .results
            .borrow()
            .contains(r#"href="./safety.html?q=dry%20device""#)
    );
}

#[test]
fn test_live_typing_settles_on_last_query() {
    let scheduler = ManualScheduler::new();
    let results_page = page("https://manual.example/en-GB/search.html");
    let corpus = block_on(load_corpus(
        &SiteFetcher::new(),
        &results_page.href(),
        &SearchSettings::default(),
        "en-GB",
    ));
    let engine = SearchEngine::new(
        Rc::clone(&results_page),
        corpus,
        SearchSettings::default(),
        scheduler.clone(),
    );

    for text in ["c", "ca", "cab", "cable"] {
        results_page.set_query_input(text);
        engine.on_input();
        scheduler.advance(Duration::from_millis(50));
    }
    assert!(results_page.results.borrow().is_empty());

    scheduler.advance(Duration::from_millis(300));
    assert!(results_page.results.borrow().contains("1 results found"));
    assert_eq!(
        results_page.href(),
        "https://manual.example/en-GB/search.html?q=cable"
    );

    results_page.set_query_input("zzz");
    engine.on_input();
    scheduler.advance(Duration::from_millis(300));
    assert!(results_page.results.borrow().is_empty());
    assert!(
        results_page
            .placeholder
            .borrow()
            .as_deref()
            .is_some_and(|message| message.contains("<strong>zzz</strong>"))
    );
}
