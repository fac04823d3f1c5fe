use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::types::Entity;
use crate::Result;

/// Length bounds and decoding options for one summarization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub min_length: usize,
    pub max_length: usize,
    pub do_sample: bool,
}

#[async_trait]
pub trait SummarizationModel: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Produce an abstractive summary of `text` within the requested bounds
    async fn summarize(&self, text: &str, request: &SummaryRequest) -> Result<String>;
}

pub trait EntityRecognizer: Send + Sync {
    /// Named entities found in `text`, in order of appearance
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Download the body of `url` as text
    async fn fetch(&self, url: &str) -> Result<String>;
}
