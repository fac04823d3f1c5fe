use scraper::{Html, Selector};
use serde_json::Value;

/// Article fields published as JSON-LD metadata.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JsonLdArticle {
    pub headline: Option<String>,
    pub body: Option<String>,
}

const ARTICLE_TYPES: &[&str] = &["NewsArticle", "Article", "ReportageNewsArticle", "BlogPosting"];

fn is_article(obj: &Value) -> bool {
    match obj.get("@type") {
        Some(Value::String(t)) => ARTICLE_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.as_str())
            .any(|t| ARTICLE_TYPES.contains(&t)),
        _ => false,
    }
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn collect_candidates<'a>(json: &'a Value, out: &mut Vec<&'a Value>) {
    match json {
        Value::Array(items) => {
            for item in items {
                collect_candidates(item, out);
            }
        }
        Value::Object(obj) => {
            if is_article(json) {
                out.push(json);
            }
            if let Some(graph) = obj.get("@graph") {
                collect_candidates(graph, out);
            }
        }
        _ => {}
    }
}

/// Extracts headline and body from JSON-LD `script` tags in the HTML document.
/// The first article-typed object that carries a field wins for that field.
pub fn extract_article(document: &Html) -> JsonLdArticle {
    let mut article = JsonLdArticle::default();

    if let Ok(script_selector) = Selector::parse("script[type='application/ld+json']") {
        for script in document.select(&script_selector) {
            let raw = script.text().collect::<String>();
            let Ok(json) = serde_json::from_str::<Value>(raw.trim()) else {
                continue;
            };

            let mut candidates = Vec::new();
            collect_candidates(&json, &mut candidates);
            for candidate in candidates {
                if article.headline.is_none() {
                    article.headline = string_field(candidate, "headline");
                }
                if article.body.is_none() {
                    article.body = string_field(candidate, "articleBody");
                }
            }
        }
    }

    article
}
