pub mod article;
pub mod fetch;
pub mod homepage;
pub mod jsonld;
pub mod pdf;
pub mod readability;
pub mod web;

pub use fetch::HttpFetcher;
pub use pdf::{extract_text_blocks_from_pdf, get_text_from_pdf, stage_pdf};
pub use web::{ExtractionMethod, Extracted, WebScraper};

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::{Html, Selector};
    use url::Url;
    use ns_core::{Error, Result};

    pub fn parse_url(url: &str) -> Result<Url> {
        let parsed = Url::parse(url.trim())?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(Error::InvalidUrl(format!("unsupported scheme '{}' in {}", other, url))),
        }
    }

    /// Collapse every run of whitespace to a single space and trim.
    pub fn normalize_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn extract_text(document: &Html, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .find(|text| !text.is_empty())
    }

    pub fn extract_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .filter_map(|el| el.value().attr(attr))
            .map(normalize_whitespace)
            .find(|text| !text.is_empty())
    }

    /// Best-effort page title: `og:title`, then `<title>`, then the first `<h1>`.
    pub fn page_title(document: &Html) -> Option<String> {
        extract_attr(document, "meta[property='og:title']", "content")
            .or_else(|| extract_text(document, "title"))
            .or_else(|| extract_text(document, "h1"))
    }

    pub fn page_title_of(html: &str) -> Option<String> {
        page_title(&Html::parse_document(html))
    }
}
