//! Command implementations.

pub mod check;
pub mod extract;
pub mod search;
pub mod serve;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use handbook_core::Config;

/// Load `handbook.toml` (optional) with environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(?path, "No configuration file, using defaults");
    }

    Config::load_with_env(path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", path.display()))
}

/// The `--site` argument, else the configured dist directory.
pub fn site_dir(site: Option<&Path>, config: &Config) -> PathBuf {
    site.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.site.dist_dir))
}
