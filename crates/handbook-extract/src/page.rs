//! Per-page extraction.

use handbook_core::{DocumentRecord, ExtractConfig, normalize_text};
use scraper::{ElementRef, Html, Node, Selector};

use crate::{ExtractError, Result};

/// Extracts a [`DocumentRecord`] from rendered page HTML.
///
/// Selectors are compiled once and shared across worker threads.
#[derive(Debug)]
pub struct PageExtractor {
    title: Selector,
    description: Selector,
    main: Selector,
    exclude: Option<Selector>,
}

impl PageExtractor {
    /// Compile the selectors named by `config`.
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let exclude = if config.exclude_selectors.is_empty() {
            None
        } else {
            Some(parse_selector(&config.exclude_selectors.join(", "))?)
        };

        Ok(Self {
            title: parse_selector("title")?,
            description: parse_selector(r#"meta[name="description"]"#)?,
            main: parse_selector(&config.main_selector)?,
            exclude,
        })
    }

    /// Extract the record for one page served at `url`.
    pub fn extract(&self, html: &str, url: impl Into<String>) -> DocumentRecord {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        let description = document
            .select(&self.description)
            .next()
            .and_then(|el| el.value().attr("content"))
            .unwrap_or_default();

        let content = match document.select(&self.main).next() {
            Some(main) => {
                let mut text = String::new();
                self.collect_text(main, &mut text);
                normalize_text(&text)
            }
            None => String::new(),
        };

        DocumentRecord::new(title.trim(), url, description.trim(), content)
    }

    /// Append the text under `element`, skipping excluded subtrees.
    fn collect_text(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(_) => {
                    let Some(child) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if self.exclude.as_ref().is_some_and(|sel| sel.matches(&child)) {
                        continue;
                    }
                    self.collect_text(child, out);
                }
                _ => {}
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        message: format!("{e:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en-GB">
<head>
  <title> Battery Replacement </title>
  <meta name="description" content=" How to swap the battery pack ">
</head>
<body>
  <header class="l-header">Site header battery</header>
  <main class="l-main">
    <nav>Breadcrumb</nav>
    <div class="p-control"><input class="p-control__search-input"></div>
    <h1>Battery   Replacement</h1>
    <p>Replace the <strong>battery</strong>
       every two years.</p>
    <script>var hidden = "script text";</script>
    <style>.x { color: red }</style>
    <noscript>Enable JavaScript</noscript>
    <footer>Page footer</footer>
  </main>
  <footer class="l-footer">Copyright</footer>
</body>
</html>"#;

    fn extractor() -> PageExtractor {
        PageExtractor::new(&ExtractConfig::default()).expect("default selectors parse")
    }

    #[test]
    fn test_extracts_title_and_description() {
        let record = extractor().extract(PAGE, "./battery.html");
        assert_eq!(record.title, "Battery Replacement");
        assert_eq!(record.description, "How to swap the battery pack");
        assert_eq!(record.url, "./battery.html");
    }

    #[test]
    fn test_content_is_normalized_and_excludes_chrome() {
        let record = extractor().extract(PAGE, "./battery.html");
        assert_eq!(
            record.content,
            "battery replacement replace the battery every two years."
        );
    }

    #[test]
    fn test_missing_parts_are_empty() {
        let record = extractor().extract("<html><body><p>Hello</p></body></html>", "./a.html");
        assert_eq!(record.title, "");
        assert_eq!(record.description, "");
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_first_main_region_wins() {
        let html = r#"<html><body>
            <div class="l-main">First region</div>
            <main>Second region</main>
        </body></html>"#;
        let record = extractor().extract(html, "./a.html");
        assert_eq!(record.content, "first region");
    }

    #[test]
    fn test_adjacent_text_is_concatenated() {
        let html = "<html><body><main><b>Wi</b><i>Fi</i> setup</main></body></html>";
        let record = extractor().extract(html, "./a.html");
        assert_eq!(record.content, "wifi setup");
    }

    #[test]
    fn test_invalid_selector() {
        let config = ExtractConfig {
            main_selector: "main[".to_string(),
            ..ExtractConfig::default()
        };
        let err = PageExtractor::new(&config).unwrap_err();
        assert!(matches!(err, ExtractError::Selector { .. }));
    }

    #[test]
    fn test_no_exclusions() {
        let config = ExtractConfig {
            exclude_selectors: Vec::new(),
            ..ExtractConfig::default()
        };
        let html = "<html><body><main>Text <nav>Menu</nav></main></body></html>";
        let record = PageExtractor::new(&config).unwrap().extract(html, "./a.html");
        assert_eq!(record.content, "text menu");
    }
}
