use std::fmt;
use std::sync::Arc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use ns_core::{SummarizationModel, Summary, SummaryRequest};
use crate::chunking::{wrap_text, DEFAULT_WRAP_WIDTH};

lazy_static! {
    // period, whitespace, then the capital that opens the next sentence
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"\.\s+[A-Z]").unwrap();
}

pub const BULLET: &str = "•";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    pub wrap_width: usize,
    pub min_words: usize,
    pub max_ratio: f64,
    pub min_ratio: f64,
    pub max_length_cap: usize,
    pub min_length_floor: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            min_words: 10,
            max_ratio: 0.7,
            min_ratio: 0.3,
            max_length_cap: 250,
            min_length_floor: 30,
        }
    }
}

impl SummarizerConfig {
    /// Model length bounds for a chunk of `word_count` words.
    ///
    /// `min_length` grows with the input while `max_length` is capped, so
    /// `min_length` is clamped to stay strictly below `max_length`.
    pub fn length_bounds(&self, word_count: usize) -> SummaryRequest {
        let words = word_count as f64;
        let max_length = ((words * self.max_ratio).ceil() as usize)
            .min(self.max_length_cap)
            .max(1);
        let min_length = ((words * self.min_ratio).ceil() as usize)
            .max(self.min_length_floor)
            .min(max_length - 1);

        SummaryRequest {
            min_length,
            max_length,
            do_sample: false,
        }
    }
}

/// Runs a summarization model over arbitrarily long text, one chunk at a time.
pub struct Summarizer {
    model: Arc<dyn SummarizationModel>,
    config: SummarizerConfig,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Summarizer {
    pub fn new(model: Arc<dyn SummarizationModel>) -> Self {
        Self::with_config(model, SummarizerConfig::default())
    }

    pub fn with_config(model: Arc<dyn SummarizationModel>, config: SummarizerConfig) -> Self {
        Self { model, config }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize `text` into bullet points.
    ///
    /// Chunks that are too short or that the model fails on are logged and
    /// skipped, so this never fails; the result may be empty.
    pub async fn summarize_text(&self, text: &str) -> Summary {
        let chunks = wrap_text(text, self.config.wrap_width);
        let total = chunks.len();
        let mut full_summary = String::new();

        for (i, chunk) in chunks.iter().enumerate() {
            info!("📝 Summarizing chunk {} of {}...", i + 1, total);

            let word_count = chunk.split_whitespace().count();
            if word_count < self.config.min_words {
                warn!("⚠️ Skipping too-short chunk {} ({} words)", i + 1, word_count);
                continue;
            }

            let request = self.config.length_bounds(word_count);
            debug!(
                "Chunk {} has {} words, asking {} for {}..{} tokens",
                i + 1,
                word_count,
                self.model.name(),
                request.min_length,
                request.max_length
            );

            match self.model.summarize(chunk, &request).await {
                Ok(result) => {
                    let result = result.trim();
                    if !result.is_empty() {
                        if !full_summary.is_empty() {
                            full_summary.push(' ');
                        }
                        full_summary.push_str(result);
                    }
                }
                Err(e) => {
                    error!("❌ Error summarizing chunk {}: {}", i + 1, e);
                    continue;
                }
            }
        }

        Summary::new(to_bullets(&full_summary))
    }
}

/// Split model output into bullets at `. ` followed by an uppercase letter.
pub fn to_bullets(text: &str) -> Vec<String> {
    let text = text.trim();
    let mut fragments = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BOUNDARY.find_iter(text) {
        fragments.push(&text[start..m.start()]);
        // the capital is ASCII, so it is the last byte of the match
        start = m.end() - 1;
    }
    fragments.push(&text[start..]);

    fragments
        .into_iter()
        .map(|f| f.trim().trim_end_matches('.').trim_end())
        .filter(|f| !f.is_empty())
        .map(|f| format!("{} {}.", BULLET, f))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ns_core::{Error, Result};
    use std::sync::Mutex;

    struct MockModel {
        calls: Mutex<Vec<SummaryRequest>>,
        fail_on: Option<usize>,
    }

    impl MockModel {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(call),
            }
        }
    }

    #[async_trait]
    impl SummarizationModel for MockModel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn summarize(&self, _text: &str, request: &SummaryRequest) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(*request);
            if self.fail_on == Some(calls.len()) {
                return Err(Error::Inference("model exploded".to_string()));
            }
            Ok(format!("Chunk {} was summarized. It had content.", calls.len()))
        }
    }

    fn words(n: usize) -> String {
        vec!["news"; n].join(" ")
    }

    #[test]
    fn test_length_bounds_small_chunk() {
        let config = SummarizerConfig::default();
        let bounds = config.length_bounds(50);
        assert_eq!(bounds.max_length, 35);
        assert_eq!(bounds.min_length, 30);
        assert!(!bounds.do_sample);
    }

    #[test]
    fn test_length_bounds_are_capped_and_ordered() {
        let config = SummarizerConfig::default();
        for wc in 10..5000 {
            let bounds = config.length_bounds(wc);
            assert!(bounds.max_length <= 250, "max too large for {}", wc);
            assert!(bounds.min_length < bounds.max_length, "min >= max for {}", wc);
        }
    }

    #[test]
    fn test_length_bounds_large_chunk_clamps_min() {
        let config = SummarizerConfig::default();
        let bounds = config.length_bounds(1000);
        assert_eq!(bounds.max_length, 250);
        assert_eq!(bounds.min_length, 249);
    }

    #[test]
    fn test_to_bullets() {
        let bullets = to_bullets("The mayor resigned. Officials were surprised. A vote is planned.");
        assert_eq!(
            bullets,
            vec![
                "• The mayor resigned.",
                "• Officials were surprised.",
                "• A vote is planned.",
            ]
        );
    }

    #[test]
    fn test_to_bullets_keeps_lowercase_continuations() {
        let bullets = to_bullets("Prices rose 3.5 percent vs. last year. Analysts agreed");
        assert_eq!(
            bullets,
            vec!["• Prices rose 3.5 percent vs. last year.", "• Analysts agreed."]
        );
    }

    #[test]
    fn test_to_bullets_empty() {
        assert!(to_bullets("").is_empty());
        assert!(to_bullets("  .  ").is_empty());
    }

    #[tokio::test]
    async fn test_short_chunk_is_skipped() {
        let model = Arc::new(MockModel::new());
        let summarizer = Summarizer::new(model.clone());

        let summary = summarizer.summarize_text("only five words in here").await;
        assert!(summary.is_empty());
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_chunk_produces_bullets() {
        let model = Arc::new(MockModel::new());
        let summarizer = Summarizer::new(model.clone());

        let summary = summarizer.summarize_text(&words(500)).await;
        assert_eq!(model.calls.lock().unwrap().len(), 1);
        assert!(!summary.bullets.is_empty());
        for bullet in &summary.bullets {
            assert!(bullet.starts_with("• "));
            assert!(bullet.ends_with('.'));
        }
    }

    #[tokio::test]
    async fn test_failed_chunk_does_not_abort() {
        let model = Arc::new(MockModel::failing_on(1));
        let config = SummarizerConfig {
            wrap_width: 200,
            ..SummarizerConfig::default()
        };
        let summarizer = Summarizer::with_config(model.clone(), config);

        let summary = summarizer.summarize_text(&words(100)).await;
        let calls = model.calls.lock().unwrap().len();
        assert!(calls > 1);
        assert!(!summary.bullets.is_empty());
        assert!(summary.bullets.iter().all(|b| !b.contains("Chunk 1 ")));
    }
}
