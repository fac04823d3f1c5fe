use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ns_core::{Article, Error, PageFetcher, Result};
use super::article::parse_article;
use super::homepage::article_links;
use super::readability::extract_main_content;
use super::utils::{page_title_of, parse_url};
use crate::logging::Logger;

pub const DEFAULT_MAX_ARTICLES: usize = 20;

/// Which extractor produced an article's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Readability,
    ArticleParser,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::Readability => f.write_str("readability"),
            ExtractionMethod::ArticleParser => f.write_str("article parser"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Extracted {
    pub article: Article,
    pub method: ExtractionMethod,
}

/// Generic news scraper: works on any site, no per-outlet selectors.
#[derive(Clone)]
pub struct WebScraper {
    fetcher: Arc<dyn PageFetcher>,
}

impl WebScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    async fn readability(&self, url: &str) -> Result<Article> {
        let html = self.fetcher.fetch(url).await?;
        let content = extract_main_content(&html, Some(url))?;
        let title = content.title.or_else(|| page_title_of(&html));
        Ok(Article::new(url, title, content.text))
    }

    /// Download `url` and parse it as a news article.
    pub async fn scrape_article(&self, url: &str) -> Result<Article> {
        let html = self.fetcher.fetch(url).await?;
        let parsed = parse_article(&html)?;
        Ok(Article::new(url, parsed.title, parsed.text))
    }

    /// Main text of the page at `url`: readability first, the article parser
    /// when that fails. Both failing is an error naming both causes.
    pub async fn get_clean_article_text(&self, url: &str) -> Result<Extracted> {
        parse_url(url)?;

        let readability_err = match self.readability(url).await {
            Ok(article) => {
                return Ok(Extracted {
                    article,
                    method: ExtractionMethod::Readability,
                })
            }
            Err(e) => e,
        };
        warn!("Readability failed for {}: {}. Falling back to article parser", url, readability_err);

        match self.scrape_article(url).await {
            Ok(article) => Ok(Extracted {
                article,
                method: ExtractionMethod::ArticleParser,
            }),
            Err(parser_err) => Err(Error::Extraction(format!(
                "could not extract {} (readability: {}; article parser: {})",
                url, readability_err, parser_err
            ))),
        }
    }

    /// Article links of a homepage, at most `max_articles`.
    pub async fn get_article_urls(&self, homepage: &str, max_articles: usize) -> Result<Vec<String>> {
        let base = parse_url(homepage)?;
        let html = self.fetcher.fetch(homepage).await?;
        let mut urls = article_links(&base, &html);
        urls.truncate(max_articles);
        Ok(urls)
    }

    /// Articles linked from `homepage`, downloaded one after another.
    ///
    /// Only the homepage fetch is fatal; articles that fail to download or
    /// parse, or come back empty, are logged and skipped.
    pub async fn get_articles_from_homepage(&self, homepage: &str, max_articles: usize) -> Result<Vec<Article>> {
        let urls = self.get_article_urls(homepage, max_articles).await?;
        info!("🔗 Found {} article links on {}", urls.len(), homepage);

        let total = urls.len();
        let mut articles = Vec::with_capacity(total);
        for (i, url) in urls.into_iter().enumerate() {
            let logger = Logger::new().with_prefix(format!("[{}/{}]", i + 1, total));
            match self.scrape_article(&url).await {
                Ok(article) if article.text.trim().is_empty() => {
                    logger.warn(&format!("Skipping {}: empty article text", url));
                }
                Ok(article) => articles.push(article),
                Err(e) => logger.error(&format!("Failed to fetch {}: {}", url, e)),
            }
        }
        Ok(articles)
    }
}
