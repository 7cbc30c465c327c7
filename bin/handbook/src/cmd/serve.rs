//! Serve command - local preview of the rendered site

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};
use tokio::net::TcpListener;

use super::{load_config, site_dir};
use crate::server::create_router;

/// Run the serve command.
///
/// Serves the site over HTTP so corpus fetches behave as in production.
pub async fn run(config_path: &Path, site: Option<&Path>, port: u16) -> Result<()> {
    let config = load_config(config_path)?;
    let site_dir = site_dir(site, &config);
    tracing::info!(?site_dir, port, "Starting preview server");

    if !site_dir.is_dir() {
        bail!(
            "Site directory {} not found; build the site first",
            site_dir.display()
        );
    }

    let app = create_router(&site_dir, &config.site.fallback_language);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Preview server running at http://{addr}");
    println!("  Serving {}", site_dir.display());
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}
