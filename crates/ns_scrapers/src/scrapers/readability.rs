//! Main-content extraction with `dom_smoothie`, a port of Mozilla's
//! Readability. The cleaned article markup is flattened into one line of
//! text per block element.

use dom_smoothie::{Config, Readability};
use scraper::{Html, Selector};
use ns_core::{Error, Result};
use super::utils::normalize_whitespace;

/// Readability keeps its best attempt even when it is a single stray
/// sentence; below this the page is handed to the article parser.
pub const MIN_READABLE_WORDS: usize = 20;

const MAX_ELEMENTS_TO_PARSE: usize = 9000;

const BLOCKS: &str = "p, h2, h3, h4, h5, h6, li, blockquote, pre";

#[derive(Debug, Clone, PartialEq)]
pub struct MainContent {
    pub title: Option<String>,
    pub text: String,
}

/// Run Readability on `html`; `url` resolves relative links.
pub fn extract_main_content(html: &str, url: Option<&str>) -> Result<MainContent> {
    let config = Config {
        max_elements_to_parse: MAX_ELEMENTS_TO_PARSE,
        ..Default::default()
    };

    let mut readability = Readability::new(html, url, Some(config))
        .map_err(|e| Error::Extraction(format!("readability: {}", e)))?;
    let article = readability
        .parse()
        .map_err(|e| Error::Extraction(format!("readability: {}", e)))?;

    let text = block_text(&article.content);
    let words = text.split_whitespace().count();
    if words < MIN_READABLE_WORDS {
        return Err(Error::Extraction(format!(
            "readability found only {} words of content",
            words
        )));
    }

    let title = normalize_whitespace(&article.title);
    Ok(MainContent {
        title: (!title.is_empty()).then_some(title),
        text,
    })
}

/// Text of the cleaned article markup, one line per block.
fn block_text(content: &str) -> String {
    let fragment = Html::parse_fragment(content);
    let Ok(selector) = Selector::parse(BLOCKS) else {
        return String::new();
    };

    let blocks: Vec<String> = fragment
        .select(&selector)
        // nested blocks (a <p> in an <li>) are covered by their outermost block
        .filter(|el| {
            !el.ancestors()
                .filter_map(scraper::ElementRef::wrap)
                .any(|parent| selector.matches(&parent))
        })
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();

    if blocks.is_empty() {
        normalize_whitespace(&fragment.root_element().text().collect::<String>())
    } else {
        blocks.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "The city council approved the new transit budget on Tuesday evening after a long debate. \
                          Funding for three new bus lines will start next spring, the mayor said.";

    #[test]
    fn test_extracts_article_body() {
        let html = format!(
            r#"<html><head><title>Budget passes</title></head><body>
                <nav><a href="/">Home</a> <a href="/world">World</a></nav>
                <article><h1>Budget passes</h1><p>{}</p><p>{}</p></article>
                <footer><p>Copyright News Example, all rights reserved worldwide.</p></footer>
            </body></html>"#,
            REPORT, REPORT
        );
        let content = extract_main_content(&html, Some("https://news.example.com/budget")).unwrap();
        assert_eq!(content.title.as_deref(), Some("Budget passes"));
        assert!(content.text.contains("approved the new transit budget"));
    }

    #[test]
    fn test_blocks_are_separate_lines() {
        let text = block_text("<div><p>First  paragraph.</p><ul><li><p>Item one.</p></li></ul><h2>Next</h2></div>");
        assert_eq!(text, "First paragraph.\nItem one.\nNext");
    }

    #[test]
    fn test_loose_text_without_blocks() {
        assert_eq!(block_text("<div>Just   some\ntext</div>"), "Just some text");
    }

    #[test]
    fn test_thin_page_fails() {
        let result = extract_main_content("<html><body><p>Short.</p></body></html>", None);
        assert!(matches!(result, Err(Error::Extraction(_))));
    }
}
