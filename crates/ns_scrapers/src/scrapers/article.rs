use scraper::{Html, Selector};
use ns_core::{Error, Result};
use super::jsonld;
use super::utils::{normalize_whitespace, page_title};

/// Paragraphs shorter than this are usually captions, bylines or buttons.
const MIN_PARAGRAPH_WORDS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArticle {
    pub title: Option<String>,
    pub text: String,
}

/// General-purpose news article parser.
///
/// Prefers the `articleBody` published as JSON-LD and otherwise keeps every
/// substantial `<p>` on the page, wherever it sits in the layout.
pub fn parse_article(html: &str) -> Result<ParsedArticle> {
    let document = Html::parse_document(html);
    let metadata = jsonld::extract_article(&document);
    let title = metadata.headline.or_else(|| page_title(&document));

    let text = match metadata.body {
        Some(body) => body,
        None => paragraph_text(&document),
    };

    if text.trim().is_empty() {
        return Err(Error::Extraction("no article text found".to_string()));
    }

    Ok(ParsedArticle {
        title,
        text: text.trim().to_string(),
    })
}

fn paragraph_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|p| normalize_whitespace(&p.text().collect::<String>()))
        .filter(|text| text.split_whitespace().count() >= MIN_PARAGRAPH_WORDS)
        .collect::<Vec<_>>()
        .join("\n\n")
}
