//! Static preview server for the rendered site

use std::path::Path;

use axum::{Router, response::Redirect, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the preview router.
///
/// `/` redirects to the fallback language's index page; everything else is
/// served from `site_dir`.
pub fn create_router(site_dir: &Path, fallback_language: &str) -> Router {
    let home = format!("/{fallback_language}/index.html");

    Router::new()
        .route(
            "/",
            get(move || {
                let home = home.clone();
                async move { Redirect::temporary(&home) }
            }),
        )
        .fallback_service(ServeDir::new(site_dir))
        .layer(TraceLayer::new_for_http())
}
