use std::fmt;
use ns_core::{Result, SummarizationModel, SummaryRequest};

/// Offline stand-in that returns the leading words of its input.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SummarizationModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, text: &str, request: &SummaryRequest) -> Result<String> {
        // Take the first max_length words and join them
        let words: Vec<&str> = text.split_whitespace().take(request.max_length).collect();
        let mut summary = words.join(" ");
        if !summary.is_empty() && !summary.ends_with('.') {
            summary.push('.');
        }
        Ok(summary)
    }
}
