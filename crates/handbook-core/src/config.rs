//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    lang::is_language_code,
};

/// Main configuration structure for Handbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Browser search settings.
    #[serde(default)]
    pub search: SearchSettings,

    /// Corpus extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding the built site, one subdirectory per language.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,

    /// Language used when the page location carries no language segment.
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,
}

/// Settings shared by the search engine and the page highlighter.
///
/// The browser runtime uses [`SearchSettings::default`]; the CLI can override
/// values from `handbook.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// File name identifying the dedicated results page.
    #[serde(default = "default_search_page")]
    pub page: String,

    /// Location query parameter carrying the active query.
    #[serde(default = "default_param")]
    pub param: String,

    /// Quiet period before a live search runs (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,

    /// Delay before scrolling to the first page highlight (milliseconds).
    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u32,

    /// Page-relative corpus path; `{lang}` is replaced by the language code.
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Selector of the query input control.
    #[serde(default = "default_input_selector")]
    pub input_selector: String,

    /// Selector of the results container.
    #[serde(default = "default_results_selector")]
    pub results_selector: String,

    /// Selector of the "no results" placeholder.
    #[serde(default = "default_no_results_selector")]
    pub no_results_selector: String,

    /// Selector of the main content region scanned by the page highlighter.
    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    /// Class put on page highlights.
    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,
}

/// Corpus extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Selector of the element whose text becomes `content`.
    #[serde(default = "default_main_selector")]
    pub main_selector: String,

    /// Subtrees of the main element dropped before taking its text.
    #[serde(default = "default_exclude_selectors")]
    pub exclude_selectors: Vec<String>,

    /// HTML files whose name starts with this prefix are partials, not pages.
    #[serde(default = "default_skip_prefix")]
    pub skip_prefix: String,
}

// Default value functions
fn default_dist_dir() -> String {
    "dist".to_string()
}

fn default_fallback_language() -> String {
    "en-GB".to_string()
}

fn default_search_page() -> String {
    "search.html".to_string()
}

fn default_param() -> String {
    "q".to_string()
}

fn default_debounce_ms() -> u32 {
    300
}

fn default_scroll_delay_ms() -> u32 {
    100
}

fn default_data_path() -> String {
    "./assets/data/searchdata-{lang}.json".to_string()
}

fn default_input_selector() -> String {
    ".p-control__search-input".to_string()
}

fn default_results_selector() -> String {
    ".p-search__results".to_string()
}

fn default_no_results_selector() -> String {
    ".p-search__no-results".to_string()
}

fn default_content_selector() -> String {
    ".p-main__content".to_string()
}

fn default_highlight_class() -> String {
    "search-highlight".to_string()
}

fn default_main_selector() -> String {
    ".l-main, main".to_string()
}

fn default_exclude_selectors() -> Vec<String> {
    [
        "script",
        "style",
        "noscript",
        ".l-header",
        ".l-footer",
        ".p-control",
        "header",
        "footer",
        "nav",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_skip_prefix() -> String {
    "_".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
            fallback_language: default_fallback_language(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page: default_search_page(),
            param: default_param(),
            debounce_ms: default_debounce_ms(),
            scroll_delay_ms: default_scroll_delay_ms(),
            data_path: default_data_path(),
            input_selector: default_input_selector(),
            results_selector: default_results_selector(),
            no_results_selector: default_no_results_selector(),
            content_selector: default_content_selector(),
            highlight_class: default_highlight_class(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            main_selector: default_main_selector(),
            exclude_selectors: default_exclude_selectors(),
            skip_prefix: default_skip_prefix(),
        }
    }
}

impl SearchSettings {
    /// Corpus path for a language code.
    pub fn corpus_path(&self, lang: &str) -> String {
        self.data_path.replace("{lang}", lang)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration if the file exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(?path, "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration using the config crate, with `HANDBOOK__` overrides
    /// from the environment (e.g. `HANDBOOK__SEARCH__DEBOUNCE_MS=500`).
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("HANDBOOK").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.dist_dir.trim().is_empty() {
            return Err(CoreError::config("site.dist_dir cannot be empty"));
        }

        if !is_language_code(&self.site.fallback_language) {
            return Err(CoreError::config(format!(
                "site.fallback_language must look like en-GB, got {:?}",
                self.site.fallback_language
            )));
        }

        if self.search.page.is_empty() {
            return Err(CoreError::config("search.page cannot be empty"));
        }

        if self.search.param.is_empty() {
            return Err(CoreError::config("search.param cannot be empty"));
        }

        if !self.search.data_path.contains("{lang}") {
            return Err(CoreError::config(
                "search.data_path must contain a {lang} placeholder",
            ));
        }

        if self.extract.main_selector.trim().is_empty() {
            return Err(CoreError::config("extract.main_selector cannot be empty"));
        }

        if self.search.debounce_ms > 5_000 {
            tracing::warn!(
                debounce_ms = self.search.debounce_ms,
                "search.debounce_ms is unusually long"
            );
        }

        Ok(())
    }
}
