use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ns_core::{ArticleSummary, PageFetcher, PdfSummary, Result, SectionSummary, Summary};
use ns_inference::{EntityBooster, EntityStrategy, Summarizer};
use crate::logging::Logger;
use crate::scrapers::{extract_text_blocks_from_pdf, get_text_from_pdf, WebScraper};
use crate::segmenter::extract_headlines_and_paragraphs;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfMode {
    /// Summarize the whole document as one text
    #[default]
    Full,
    /// Summarize each headline's section separately
    Structured,
}

impl FromStr for PdfMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "structured" => Ok(Self::Structured),
            _ => Err(format!("Unknown PDF mode: {}", s)),
        }
    }
}

impl fmt::Display for PdfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfMode::Full => f.write_str("full"),
            PdfMode::Structured => f.write_str("structured"),
        }
    }
}

/// Ties extraction, summarization and entity handling together for each
/// kind of source. Sources are processed one at a time.
pub struct SummaryManager {
    scraper: WebScraper,
    summarizer: Arc<Summarizer>,
    booster: EntityBooster,
    strategy: EntityStrategy,
}

impl SummaryManager {
    pub fn new(fetcher: Arc<dyn PageFetcher>, summarizer: Arc<Summarizer>) -> Self {
        Self {
            scraper: WebScraper::new(fetcher),
            summarizer,
            booster: EntityBooster::default(),
            strategy: EntityStrategy::None,
        }
    }

    pub fn with_entities(mut self, booster: EntityBooster, strategy: EntityStrategy) -> Self {
        self.booster = booster;
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> EntityStrategy {
        self.strategy
    }

    pub fn model_name(&self) -> &str {
        self.summarizer.model_name()
    }

    /// Summarize `text`, applying the configured entity strategy.
    pub async fn summarize_source(&self, text: &str) -> Summary {
        match self.strategy {
            EntityStrategy::None => self.summarizer.summarize_text(text).await,
            EntityStrategy::Emphasize => {
                let emphasized = self.booster.emphasize_named_entities(text);
                self.summarizer.summarize_text(&emphasized).await
            }
            EntityStrategy::Boost => {
                let summary = self.summarizer.summarize_text(text).await;
                self.booster.boost_summary(text, summary)
            }
        }
    }

    pub async fn summarize_url(&self, url: &str) -> Result<Summary> {
        let extracted = self.scraper.get_clean_article_text(url).await?;
        info!(
            "📰 Extracted {} words from {} using {}",
            extracted.article.word_count(),
            url,
            extracted.method
        );
        Ok(self.summarize_source(&extracted.article.text).await)
    }

    pub async fn summarize_homepage(&self, url: &str, max_articles: usize) -> Result<Vec<ArticleSummary>> {
        let articles = self.scraper.get_articles_from_homepage(url, max_articles).await?;
        let total = articles.len();

        let mut summaries = Vec::with_capacity(total);
        for (i, article) in articles.into_iter().enumerate() {
            let logger = Logger::new().with_prefix(format!("[{}/{}]", i + 1, total));
            let title = article.title.clone().unwrap_or_else(|| article.url.clone());
            logger.info(&format!("🤖 Summarizing {}", title));

            let summary = self.summarize_source(&article.text).await;
            if summary.is_empty() {
                logger.warn("Model returned no bullets");
            }
            summaries.push(ArticleSummary {
                url: article.url,
                title,
                summary,
            });
        }
        Ok(summaries)
    }

    /// One summary per headline section, or `None` when the text has no
    /// recognizable headlines.
    pub async fn summarize_sections(&self, text: &str) -> Option<Vec<SectionSummary>> {
        let pairs = extract_headlines_and_paragraphs(text);
        if pairs.is_empty() {
            return None;
        }

        let total = pairs.len();
        let mut sections = Vec::with_capacity(total);
        for (i, pair) in pairs.into_iter().enumerate() {
            let logger = Logger::new().with_prefix(format!("§{}/{}", i + 1, total));
            logger.debug(&pair.headline);
            let summary = self.summarize_source(&pair.paragraph).await;
            sections.push(SectionSummary {
                headline: pair.headline,
                summary,
            });
        }
        Some(sections)
    }

    pub async fn summarize_pdf(&self, path: impl AsRef<Path>, mode: PdfMode) -> Result<PdfSummary> {
        let path = path.as_ref();
        if mode == PdfMode::Structured {
            let blocks = extract_text_blocks_from_pdf(path).await?;
            if let Some(sections) = self.summarize_sections(&blocks).await {
                return Ok(PdfSummary::Sections { sections });
            }
            warn!("No headlines found in {}, summarizing the full document", path.display());
        }

        let text = get_text_from_pdf(path).await?;
        Ok(PdfSummary::Full {
            summary: self.summarize_source(&text).await,
            fell_back: mode == PdfMode::Structured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use async_trait::async_trait;
    use ns_core::{Entity, EntityLabel, EntityRecognizer, SummarizationModel, SummaryRequest};
    use crate::scrapers::pdf::tests::write_text_pdf;
    use crate::scrapers::web::tests::{article_page, homepage_fetcher, MockFetcher, HOME};

    #[derive(Default)]
    struct MockModel {
        inputs: Mutex<Vec<String>>,
    }

    impl MockModel {
        fn inputs(&self) -> Vec<String> {
            self.inputs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SummarizationModel for MockModel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn summarize(&self, text: &str, _request: &SummaryRequest) -> Result<String> {
            self.inputs.lock().unwrap().push(text.to_string());
            Ok("Alice opened the meeting. Turnout was high.".to_string())
        }
    }

    struct FakeRecognizer;

    impl EntityRecognizer for FakeRecognizer {
        fn recognize(&self, text: &str) -> Vec<Entity> {
            [("Alice", EntityLabel::Person), ("Acme Corp", EntityLabel::Org)]
                .into_iter()
                .filter(|(name, _)| text.contains(name))
                .map(|(name, label)| Entity::new(name, label))
                .collect()
        }
    }

    fn words(n: usize) -> String {
        vec!["news"; n].join(" ")
    }

    fn manager(fetcher: MockFetcher, model: Arc<MockModel>) -> SummaryManager {
        SummaryManager::new(Arc::new(fetcher), Arc::new(Summarizer::new(model)))
    }

    #[test]
    fn test_pdf_mode_parse() {
        assert_eq!("structured".parse::<PdfMode>().unwrap(), PdfMode::Structured);
        assert_eq!("FULL".parse::<PdfMode>().unwrap(), PdfMode::Full);
        assert!("sections".parse::<PdfMode>().is_err());
    }

    #[tokio::test]
    async fn test_summarize_url_single_chunk() {
        let url = "https://news.example.com/long-read";
        let fetcher = MockFetcher::default().with_page(url, &article_page("Long read", &words(500)));
        let model = Arc::new(MockModel::default());

        let summary = manager(fetcher, model.clone()).summarize_url(url).await.unwrap();

        assert_eq!(model.inputs().len(), 1);
        assert!(!summary.bullets.is_empty());
        for bullet in &summary.bullets {
            assert!(bullet.starts_with('•'));
            assert!(bullet.ends_with('.'));
        }
        assert!(summary.missing_info.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_url_unreachable() {
        let model = Arc::new(MockModel::default());
        let result = manager(MockFetcher::default(), model.clone())
            .summarize_url("https://news.example.com/gone")
            .await;
        assert!(result.is_err());
        assert!(model.inputs().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_homepage_partial_failure() {
        let model = Arc::new(MockModel::default());
        let groups = manager(homepage_fetcher(), model)
            .summarize_homepage(HOME, 20)
            .await
            .unwrap();

        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].title, "Story 1");
        assert!(groups.iter().all(|g| !g.summary.is_empty()));
    }

    #[tokio::test]
    async fn test_boost_strategy_reports_missing_entities() {
        let url = "https://news.example.com/board";
        let body = format!("Alice met the board of Acme Corp to discuss {}", words(40));
        let fetcher = MockFetcher::default().with_page(url, &article_page("Board", &body));
        let model = Arc::new(MockModel::default());
        let manager = manager(fetcher, model)
            .with_entities(EntityBooster::new(Arc::new(FakeRecognizer)), EntityStrategy::Boost);

        let summary = manager.summarize_url(url).await.unwrap();
        assert_eq!(summary.missing_info, vec![Entity::new("Acme Corp", EntityLabel::Org)]);
    }

    #[tokio::test]
    async fn test_emphasize_strategy_prefixes_input() {
        let model = Arc::new(MockModel::default());
        let manager = manager(MockFetcher::default(), model.clone())
            .with_entities(EntityBooster::new(Arc::new(FakeRecognizer)), EntityStrategy::Emphasize);

        let text = format!("Alice spoke to reporters about {}", words(40));
        let summary = manager.summarize_source(&text).await;

        assert!(summary.missing_info.is_empty());
        assert!(model.inputs()[0].starts_with("This article includes key people and dates: Alice."));
    }

    #[tokio::test]
    async fn test_sections_without_headlines() {
        let model = Arc::new(MockModel::default());
        let manager = manager(MockFetcher::default(), model.clone());

        let text = "plain lowercase text with no headings at all.\nmore of the same.";
        assert!(manager.summarize_sections(text).await.is_none());
        assert!(model.inputs().is_empty());
    }

    #[tokio::test]
    async fn test_sections_with_headlines() {
        let model = Arc::new(MockModel::default());
        let manager = manager(MockFetcher::default(), model.clone());

        let text = format!("CITY COUNCIL\n{}\nSPORTS DESK\n{}", words(20), words(20));
        let sections = manager.summarize_sections(&text).await.unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].headline, "CITY COUNCIL");
        assert_eq!(sections[1].headline, "SPORTS DESK");
        assert_eq!(model.inputs().len(), 2);
    }

    #[tokio::test]
    async fn test_structured_pdf_failure_is_fatal() {
        let model = Arc::new(MockModel::default());
        let manager = manager(MockFetcher::default(), model);
        let result = manager
            .summarize_pdf("/nonexistent/report.pdf", PdfMode::Structured)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_structured_pdf_without_headlines_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("memo.pdf");
        write_text_pdf(
            &path,
            &[
                &[
                    "the water board met on tuesday to review the summer supply plan,",
                    "and members agreed that reservoir levels are high enough for now.",
                ],
                &["a second review is planned for the autumn once the rainfall figures arrive."],
            ],
        );
        let model = Arc::new(MockModel::default());

        let result = manager(MockFetcher::default(), model.clone())
            .summarize_pdf(&path, PdfMode::Structured)
            .await
            .unwrap();

        match result {
            PdfSummary::Full { summary, fell_back } => {
                assert!(fell_back);
                assert!(!summary.bullets.is_empty());
            }
            other => panic!("expected a full summary, got {:?}", other),
        }
        assert!(model.inputs()[0].contains("reservoir levels"));
    }

    #[tokio::test]
    async fn test_structured_pdf_with_headlines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bulletin.pdf");
        write_text_pdf(
            &path,
            &[&[
                "CITY COUNCIL",
                "the council voted on monday to extend the library opening hours",
                "across every district from the first week of next month.",
                "SPORTS DESK",
                "the home side won the regional final in extra time on sunday,",
                "and the trophy parade will pass the town hall on friday.",
            ]],
        );
        let model = Arc::new(MockModel::default());

        let result = manager(MockFetcher::default(), model.clone())
            .summarize_pdf(&path, PdfMode::Structured)
            .await
            .unwrap();

        match result {
            PdfSummary::Sections { sections } => {
                let headlines: Vec<&str> = sections.iter().map(|s| s.headline.as_str()).collect();
                assert_eq!(headlines, ["CITY COUNCIL", "SPORTS DESK"]);
                assert!(sections.iter().all(|s| !s.summary.bullets.is_empty()));
            }
            other => panic!("expected sections, got {:?}", other),
        }
        assert_eq!(model.inputs().len(), 2);
    }

    #[tokio::test]
    async fn test_full_pdf_mode_does_not_fall_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bulletin.pdf");
        write_text_pdf(
            &path,
            &[&[
                "CITY COUNCIL",
                "the council voted on monday to extend the library opening hours",
                "across every district from the first week of next month.",
            ]],
        );
        let model = Arc::new(MockModel::default());

        let result = manager(MockFetcher::default(), model)
            .summarize_pdf(&path, PdfMode::Full)
            .await
            .unwrap();
        assert!(matches!(result, PdfSummary::Full { fell_back: false, .. }));
    }
}
