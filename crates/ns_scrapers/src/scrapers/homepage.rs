use std::collections::HashSet;
use scraper::{Html, Selector};
use url::Url;

/// Path fragments that mark navigation, account or listing pages.
const SKIPPED_PATHS: &[&str] = &[
    "/tag/", "/tags/", "/topic/", "/topics/", "/author/", "/authors/", "/autor/", "/category/",
    "/newsletter", "/subscribe", "/login", "/signin", "/register", "/account", "/mi-usuario/",
    "/search", "/about", "/contact", "/privacy", "/terms", "/cookies", "/help", "/ayuda/",
    "/live/", "/video/", "/videos/", "/podcast", "/weather", "/404", "/error",
];

const SKIPPED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".svg", ".pdf", ".xml", ".rss", ".mp3", ".mp4"];

/// Path segments that are followed by an article slug or id.
const ARTICLE_MARKERS: &[&str] = &["article", "articles", "story", "stories", "news-story", "a"];

fn host_key(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_start_matches("www.").to_ascii_lowercase())
}

fn looks_like_article(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    if path.is_empty() || path == "/" {
        return false;
    }
    if SKIPPED_PATHS.iter().any(|p| path.contains(p)) {
        return false;
    }
    if SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let Some(last) = segments.last() else {
        return false;
    };

    // slugs like /politics/council-approves-new-budget
    if last.chars().filter(|&c| c == '-').count() > 2 {
        return true;
    }
    // numeric ids and dated paths like /2024/05/12/...
    if segments.iter().any(|s| {
        let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
        digits >= 5 || (s.len() == 4 && digits == 4)
    }) {
        return true;
    }
    segments
        .iter()
        .take(segments.len() - 1)
        .any(|s| ARTICLE_MARKERS.contains(s))
}

fn clean(mut url: Url) -> Url {
    url.set_fragment(None);
    if url
        .query()
        .is_some_and(|q| q.contains("utm_") || q.contains("_ga="))
    {
        url.set_query(None);
    }
    url
}

/// Article links found on a homepage, resolved against `base`, same-site
/// only, deduplicated in page order.
pub fn article_links(base: &Url, html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let site = host_key(base);

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for href in document.select(&selector).filter_map(|a| a.value().attr("href")) {
        let Ok(url) = base.join(href.trim()) else {
            continue;
        };
        if !matches!(url.scheme(), "http" | "https") || host_key(&url) != site {
            continue;
        }
        let url = clean(url);
        if !looks_like_article(&url) {
            continue;
        }
        let url = url.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }
    links
}
