//! Check command - validate configuration and search corpora

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use color_eyre::eyre::{Result, bail};
use handbook_core::{Config, Corpus, is_language_code};
use handbook_extract::Extractor;

use super::site_dir;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every language's corpus.
pub fn run(config_path: &Path, site: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and corpora");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    if !config_path.exists() {
        result.add_warning(format!(
            "Configuration file {} not found, using defaults",
            config_path.display()
        ));
    }
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        let site_dir = site_dir(site, cfg);
        println!("\nChecking search corpora in {}...", site_dir.display());
        check_site(cfg, &site_dir, &mut result);
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check every language directory under `site_dir` for a usable corpus.
pub fn check_site(config: &Config, site_dir: &Path, result: &mut ValidationResult) {
    let extractor = match Extractor::new(config.clone(), site_dir) {
        Ok(extractor) => extractor,
        Err(e) => {
            result.add_error(format!("Extraction settings: {e}"));
            return;
        }
    };

    let languages = match extractor.languages() {
        Ok(languages) => languages,
        Err(e) => {
            result.add_error(e.to_string());
            return;
        }
    };

    let mut pages_by_language: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for language in &languages {
        if !is_language_code(language) {
            result.add_warning(format!(
                "Directory {language}/ is not a language code and gets its own corpus"
            ));
        }

        let path = extractor.output_path(language);
        if !path.exists() {
            result.add_error(format!(
                "Missing corpus {} (run `handbook extract`)",
                path.display()
            ));
            println!("  ✗ {language}: corpus missing");
            continue;
        }

        let corpus = match Corpus::read_from(&path) {
            Ok(corpus) => corpus,
            Err(e) => {
                result.add_error(format!("{}: {e}", path.display()));
                println!("  ✗ {language}: corpus unreadable");
                continue;
            }
        };

        check_corpus(&site_dir.join(language), language, &corpus, result);
        println!("  ✓ {language}: {} pages", corpus.len());

        pages_by_language.insert(
            language.clone(),
            corpus.iter().map(|record| record.url.clone()).collect(),
        );
    }

    let fallback = &config.site.fallback_language;
    match pages_by_language.get(fallback) {
        Some(reference) => {
            for (language, pages) in &pages_by_language {
                let missing = reference.difference(pages).count();
                if missing > 0 {
                    result.add_warning(format!(
                        "{language}: {missing} page(s) present in {fallback} have no counterpart"
                    ));
                }
            }
        }
        None => result.add_warning(format!(
            "Fallback language {fallback} has no corpus; pages outside a language directory will find nothing"
        )),
    }
}

/// Check one language's records against its directory.
fn check_corpus(lang_dir: &Path, language: &str, corpus: &Corpus, result: &mut ValidationResult) {
    if corpus.is_empty() {
        result.add_warning(format!("{language}: corpus is empty"));
        return;
    }

    let untitled = corpus.iter().filter(|r| r.title.trim().is_empty()).count();
    if untitled > 0 {
        result.add_warning(format!("{language}: {untitled} page(s) without a <title>"));
    }

    let stale: Vec<&str> = corpus
        .iter()
        .map(|r| r.url.as_str())
        .filter(|url| !lang_dir.join(url.trim_start_matches("./")).is_file())
        .collect();
    if !stale.is_empty() {
        result.add_warning(format!(
            "{language}: {} corpus entr{} point to missing pages (e.g. {}); re-run `handbook extract`",
            stale.len(),
            if stale.len() == 1 { "y" } else { "ies" },
            stale[0]
        ));
    }
}
