//! Page startup: highlight the query on the page, then wire the search input.

use std::rc::Rc;

use handbook_core::{SearchSettings, SiteConfig};
use handbook_search::{SearchEngine, highlight_page, load_corpus};
use tracing::{debug, info};
use wasm_bindgen::{JsCast, prelude::*};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, KeyboardEvent, Window};

use crate::{dom::DomPage, fetch::GlooFetcher, surface::DomSurface, timer::TimeoutScheduler};

type PageEngine = SearchEngine<DomPage, TimeoutScheduler>;

/// Run [`mount`] once the DOM is ready.
pub fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::once_into_js(move || mount(window, target));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount(window, document);
    }

    Ok(())
}

/// Start both page features with the default settings.
pub fn mount(window: Window, document: Document) {
    let settings = SearchSettings::default();
    let fallback_language = SiteConfig::default().fallback_language;
    let href = window.location().href().unwrap_or_default();
    let scheduler = TimeoutScheduler::new(window.clone());

    let surface = Rc::new(DomSurface::new(document.clone(), &settings.highlight_class));
    if let Some(result) = highlight_page(surface, &href, &settings, &scheduler) {
        debug!(nodes = result.nodes, "Page highlight applied");
    }

    let page = DomPage::bind(window, &document, &settings);
    spawn_local(async move {
        let corpus = load_corpus(&GlooFetcher, &href, &settings, &fallback_language).await;
        let engine = SearchEngine::new(page, corpus, settings, scheduler);
        listen(&engine);
        engine.restore();
        info!("Search ready");
    });
}

fn listen(engine: &Rc<PageEngine>) {
    let Some(input) = engine.page().input().cloned() else {
        return;
    };

    let on_key = {
        let engine = Rc::clone(engine);
        Closure::<dyn Fn(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
            // Enter that confirms an IME composition is not a submit.
            if !ev.is_composing() {
                engine.on_key(&ev.key());
            }
        })
    };
    let _ = input.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
    // Leak the closure to keep it alive for the page's lifetime
    on_key.forget();

    if engine.live_search_enabled() {
        let engine = Rc::clone(engine);
        let on_input = Closure::<dyn Fn()>::new(move || engine.on_input());
        let _ = input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref());
        on_input.forget();
    }
}
