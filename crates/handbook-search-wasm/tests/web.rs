//! Browser tests for the DOM bindings.
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use std::{rc::Rc, time::Duration};

use handbook_core::SearchSettings;
use handbook_search::{
    Scheduler, SearchPage, TaskHandle, TextSurface, highlight_page,
    schedule::manual::ManualScheduler,
};
use handbook_search_wasm::{DomPage, DomSurface, HandbookSearch, TimeoutScheduler};
use wasm_bindgen_test::*;
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture(html: &str) -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
fn search_from_json() {
    let search = HandbookSearch::from_json(
        r#"[{"title": "Battery", "url": "./battery.html", "description": "", "content": "battery"}]"#,
    )
    .unwrap();
    assert_eq!(search.document_count(), 1);

    let hits = search.search("battery").unwrap();
    assert!(js_sys::Array::is_array(&hits));
}

#[wasm_bindgen_test]
fn dom_page_renders_into_widgets() {
    let root = fixture(
        r#"<input class="p-control__search-input" value="battery">
           <div class="p-search__results"></div>
           <div class="p-search__no-results" style="display: none"></div>"#,
    );

    let page = DomPage::bind(
        web_sys::window().unwrap(),
        &document(),
        &SearchSettings::default(),
    );
    assert_eq!(page.query_input().as_deref(), Some("battery"));
    assert!(page.has_results_container());

    page.show_no_results("<p>none</p>");
    let placeholder = root.query_selector(".p-search__no-results").unwrap().unwrap();
    assert_eq!(placeholder.inner_html(), "<p>none</p>");

    page.set_results_html("<p>hit</p>");
    page.hide_no_results();
    let results = root.query_selector(".p-search__results").unwrap().unwrap();
    assert_eq!(results.inner_html(), "<p>hit</p>");

    root.remove();
}

#[wasm_bindgen_test]
fn dom_surface_highlights_content() {
    let root = fixture(
        r#"<div class="p-main__content">
             <p>Replace the battery.</p>
             <script>var battery = 1;</script>
           </div>"#,
    );

    let surface = Rc::new(DomSurface::new(document(), "search-highlight"));
    assert!(!surface.text_nodes(".p-main__content").is_empty());

    let scheduler = ManualScheduler::new();
    let result = highlight_page(
        Rc::clone(&surface),
        "https://manual.example/en-GB/battery.html?q=battery",
        &SearchSettings::default(),
        &scheduler,
    )
    .unwrap();

    assert_eq!(result.nodes, 1);
    let marks = root.query_selector_all("mark.search-highlight").unwrap();
    assert_eq!(marks.length(), 1);
    let script = root.query_selector("script").unwrap().unwrap();
    assert_eq!(script.inner_html(), "var battery = 1;");

    scheduler.advance(Duration::from_millis(100));
    root.remove();
}

#[wasm_bindgen_test]
fn cancelled_timeout_releases_task() {
    let scheduler = TimeoutScheduler::new(web_sys::window().unwrap());
    let captured = Rc::new(());
    let held = Rc::clone(&captured);

    let handle = scheduler.schedule(
        Duration::from_millis(1_000),
        Box::new(move || drop(held)),
    );
    assert_eq!(Rc::strong_count(&captured), 2);

    handle.cancel();
    assert_eq!(Rc::strong_count(&captured), 1);
}
