//! Site-wide corpus extraction.
//!
//! A rendered site keeps one directory per language directly under the site
//! root. Every page of a language becomes one record of that language's
//! corpus, written next to the pages at the configured data path.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use handbook_core::{Config, Corpus, DocumentRecord, is_language_code};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{ExtractError, Result, page::PageExtractor};

/// Statistics for one language.
#[derive(Debug, Clone, Default)]
pub struct LanguageStats {
    /// Language directory name.
    pub language: String,

    /// Records written.
    pub pages: usize,

    /// Pages that could not be read.
    pub skipped: usize,

    /// Corpus file written.
    pub output: PathBuf,
}

/// Extraction statistics.
#[derive(Debug, Clone, Default)]
pub struct ExtractStats {
    /// Per-language results, in directory name order.
    pub languages: Vec<LanguageStats>,

    /// Extraction duration in milliseconds.
    pub duration_ms: u64,
}

impl ExtractStats {
    /// Records written across all languages.
    pub fn total_pages(&self) -> usize {
        self.languages.iter().map(|lang| lang.pages).sum()
    }
}

/// Corpus extractor for one rendered site.
#[derive(Debug)]
pub struct Extractor {
    config: Config,
    site_dir: PathBuf,
    pages: PageExtractor,
}

impl Extractor {
    /// Create an extractor for the site at `site_dir`.
    pub fn new(config: Config, site_dir: impl Into<PathBuf>) -> Result<Self> {
        let pages = PageExtractor::new(&config.extract)?;
        Ok(Self {
            config,
            site_dir: site_dir.into(),
            pages,
        })
    }

    /// Site root.
    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Extract and write the corpus of every language.
    pub fn run(&self) -> Result<ExtractStats> {
        let start = Instant::now();

        let languages = self.languages()?;
        info!(languages = %languages.join(", "), "Found languages");

        let mut stats = ExtractStats::default();
        for language in &languages {
            stats.languages.push(self.extract_language(language)?);
        }
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            languages = stats.languages.len(),
            pages = stats.total_pages(),
            duration_ms = stats.duration_ms,
            "Extraction complete"
        );

        Ok(stats)
    }

    /// Language directory names, sorted.
    ///
    /// Fails if the site is missing or has no language directories.
    pub fn languages(&self) -> Result<Vec<String>> {
        if !self.site_dir.is_dir() {
            return Err(ExtractError::SiteNotFound(self.site_dir.clone()));
        }

        let mut languages = Vec::new();
        for entry in fs::read_dir(&self.site_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if !is_language_code(&name) {
                warn!(dir = %name, "Directory name is not a language code; extracting anyway");
            }
            languages.push(name);
        }

        if languages.is_empty() {
            return Err(ExtractError::NoLanguages(self.site_dir.clone()));
        }

        languages.sort();
        Ok(languages)
    }

    /// Extract and write one language's corpus.
    pub fn extract_language(&self, language: &str) -> Result<LanguageStats> {
        let lang_dir = self.site_dir.join(language);
        let (corpus, skipped) = self.extract_corpus(&lang_dir);

        let output = self.output_path(language);
        corpus.write_to(&output)?;

        info!(
            language,
            pages = corpus.len(),
            skipped,
            output = %output.display(),
            "Wrote search corpus"
        );

        Ok(LanguageStats {
            language: language.to_string(),
            pages: corpus.len(),
            skipped,
            output,
        })
    }

    /// Build the corpus for the pages under `lang_dir`.
    ///
    /// Returns the corpus and the number of pages that could not be read.
    pub fn extract_corpus(&self, lang_dir: &Path) -> (Corpus, usize) {
        let files = self.html_files(lang_dir);
        debug!(dir = %lang_dir.display(), count = files.len(), "Found pages");

        let records: Vec<Option<DocumentRecord>> = files
            .par_iter()
            .map(|path| match fs::read_to_string(path) {
                Ok(html) => Some(self.pages.extract(&html, page_url(lang_dir, path))),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read page");
                    None
                }
            })
            .collect();

        let skipped = records.iter().filter(|record| record.is_none()).count();
        (records.into_iter().flatten().collect(), skipped)
    }

    /// Corpus file for `language`.
    pub fn output_path(&self, language: &str) -> PathBuf {
        let relative = self.config.search.corpus_path(language);
        self.site_dir
            .join(language)
            .join(relative.trim_start_matches("./"))
    }

    /// Pages under `dir`, sorted by path.
    fn html_files(&self, dir: &Path) -> Vec<PathBuf> {
        let skip_prefix = self.config.extract.skip_prefix.as_str();

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Failed to walk site directory");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy();
                name.ends_with(".html") && (skip_prefix.is_empty() || !name.starts_with(skip_prefix))
            })
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }
}

/// `./` plus the path of `page` relative to `lang_dir`, `/`-separated.
fn page_url(lang_dir: &Path, page: &Path) -> String {
    let relative = page.strip_prefix(lang_dir).unwrap_or(page);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("./{}", parts.join("/"))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn page(title: &str, body: &str) -> String {
        format!("<html><head><title>{title}</title></head><body><main>{body}</main></body></html>")
    }

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(&root.join("en-GB/index.html"), &page("Home", "Welcome"));
        write(&root.join("en-GB/guide/battery.html"), &page("Battery", "Replace it"));
        write(&root.join("en-GB/_partial.html"), &page("Partial", "skip me"));
        write(&root.join("en-GB/notes.txt"), "not a page");
        write(&root.join("ja-JP/index.html"), &page("ホーム", "ようこそ"));
        fs::create_dir_all(root.join(".cache")).unwrap();
        dir
    }

    #[test]
    fn test_languages_sorted_and_hidden_skipped() {
        let dir = site();
        let extractor = Extractor::new(Config::default(), dir.path()).unwrap();
        assert_eq!(extractor.languages().unwrap(), vec!["en-GB", "ja-JP"]);
    }

    #[test]
    fn test_missing_site_is_fatal() {
        let dir = TempDir::new().unwrap();
        let extractor = Extractor::new(Config::default(), dir.path().join("dist")).unwrap();
        assert!(matches!(extractor.run(), Err(ExtractError::SiteNotFound(_))));
    }

    #[test]
    fn test_site_without_languages_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        let extractor = Extractor::new(Config::default(), dir.path()).unwrap();
        assert!(matches!(extractor.run(), Err(ExtractError::NoLanguages(_))));
    }

    #[test]
    fn test_extract_corpus_urls_and_order() {
        let dir = site();
        let extractor = Extractor::new(Config::default(), dir.path()).unwrap();

        let (corpus, skipped) = extractor.extract_corpus(&dir.path().join("en-GB"));
        assert_eq!(skipped, 0);

        let urls: Vec<&str> = corpus.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["./guide/battery.html", "./index.html"]);
        assert_eq!(corpus.records()[0].title, "Battery");
        assert_eq!(corpus.records()[0].content, "replace it");
    }

    #[test]
    fn test_run_writes_corpus_per_language() {
        let dir = site();
        let extractor = Extractor::new(Config::default(), dir.path()).unwrap();

        let stats = extractor.run().unwrap();
        assert_eq!(stats.languages.len(), 2);
        assert_eq!(stats.total_pages(), 3);

        let en = dir.path().join("en-GB/assets/data/searchdata-en-GB.json");
        assert_eq!(stats.languages[0].output, en);
        let corpus = Corpus::read_from(&en).unwrap();
        assert_eq!(corpus.len(), 2);

        let ja = Corpus::read_from(&dir.path().join("ja-JP/assets/data/searchdata-ja-JP.json"))
            .unwrap();
        assert_eq!(ja.records()[0].title, "ホーム");
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let dir = site();
        let extractor = Extractor::new(Config::default(), dir.path()).unwrap();
        let path = dir.path().join("en-GB/assets/data/searchdata-en-GB.json");

        extractor.run().unwrap();
        let first = fs::read_to_string(&path).unwrap();
        extractor.run().unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_page_url() {
        let lang = Path::new("/site/en-GB");
        assert_eq!(
            page_url(lang, Path::new("/site/en-GB/guide/battery.html")),
            "./guide/battery.html"
        );
        assert_eq!(page_url(lang, Path::new("/site/en-GB/index.html")), "./index.html");
    }
}
