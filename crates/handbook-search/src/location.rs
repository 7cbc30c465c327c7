//! Page location handling: the `q` parameter and page identity.

use url::Url;

use crate::{Result, SearchError};

/// A parsed page location (`window.location.href`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse an absolute href.
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href).map_err(|e| SearchError::Location(format!("{href}: {e}")))?;
        Ok(Self { url })
    }

    /// Path component, still percent-encoded.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// First value of parameter `name`; an empty value counts as absent.
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    /// Whether the path contains `page` (e.g. `search.html`).
    pub fn is_page(&self, page: &str) -> bool {
        self.path().contains(page)
    }

    /// This location with parameter `name` set to `value`.
    ///
    /// The first existing `name` pair is replaced in place and later ones are
    /// dropped; otherwise the pair is appended. Other pairs keep their order.
    pub fn with_param(&self, name: &str, value: &str) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut replaced = false;

        for (key, existing) in self.url.query_pairs() {
            if key == name {
                if !replaced {
                    pairs.push((key.into_owned(), value.to_string()));
                    replaced = true;
                }
            } else {
                pairs.push((key.into_owned(), existing.into_owned()));
            }
        }
        if !replaced {
            pairs.push((name.to_string(), value.to_string()));
        }

        let mut url = self.url.clone();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.into()
    }
}

/// `base?name=value` with `value` percent-encoded.
pub fn link_with_param(base: &str, name: &str, value: &str) -> String {
    format!("{base}?{name}={}", urlencoding::encode(value))
}

/// Relative link to the results page carrying a query.
pub fn search_page_link(page: &str, param: &str, query: &str) -> String {
    link_with_param(&format!("./{page}"), param, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_decodes_form_encoding() {
        let location =
            Location::parse("https://manual.example/en-GB/search.html?q=battery+pack%21")
                .expect("parse");
        assert_eq!(location.param("q").as_deref(), Some("battery pack!"));
        assert_eq!(location.param("lang"), None);
    }

    #[test]
    fn test_empty_param_is_absent() {
        let location = Location::parse("https://manual.example/search.html?q=").expect("parse");
        assert_eq!(location.param("q"), None);
    }

    #[test]
    fn test_is_page() {
        let location =
            Location::parse("file:///home/me/dist/en-GB/search.html").expect("parse");
        assert!(location.is_page("search.html"));
        assert!(!location.is_page("index.html"));
    }

    #[test]
    fn test_with_param_appends() {
        let location =
            Location::parse("https://manual.example/en-GB/search.html").expect("parse");
        assert_eq!(
            location.with_param("q", "battery pack"),
            "https://manual.example/en-GB/search.html?q=battery+pack"
        );
    }

    #[test]
    fn test_with_param_replaces_in_place() {
        let location = Location::parse(
            "https://manual.example/search.html?a=1&q=old&b=2&q=older#top",
        )
        .expect("parse");
        assert_eq!(
            location.with_param("q", "new"),
            "https://manual.example/search.html?a=1&q=new&b=2#top"
        );
    }

    #[test]
    fn test_invalid_href() {
        assert!(Location::parse("not a url").is_err());
    }

    #[test]
    fn test_link_with_param() {
        assert_eq!(
            link_with_param("./guide/battery.html", "q", "a&b c"),
            "./guide/battery.html?q=a%26b%20c"
        );
        assert_eq!(
            search_page_link("search.html", "q", "wi-fi"),
            "./search.html?q=wi-fi"
        );
    }
}
