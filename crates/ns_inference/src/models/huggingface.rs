use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use ns_core::{Error, Result, SummarizationModel, SummaryRequest};

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";

#[derive(Serialize)]
struct Parameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Serialize)]
struct Options {
    wait_for_model: bool,
}

#[derive(Serialize)]
struct SummarizationPayload<'a> {
    inputs: &'a str,
    parameters: Parameters,
    options: Options,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummarizationResponse {
    Summaries(Vec<SummaryText>),
    Error { error: String },
}

#[derive(Deserialize)]
struct SummaryText {
    summary_text: String,
}

/// Summarization through the Hugging Face inference API.
pub struct HuggingFaceModel {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    model_name: String,
}

impl HuggingFaceModel {
    pub fn new(api_key: Option<String>, model_name: Option<String>, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model_name: model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model_name)
    }
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl SummarizationModel for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn summarize(&self, text: &str, request: &SummaryRequest) -> Result<String> {
        let payload = SummarizationPayload {
            inputs: text,
            parameters: Parameters {
                min_length: request.min_length,
                max_length: request.max_length,
                do_sample: request.do_sample,
            },
            options: Options { wait_for_model: true },
        };

        let mut builder = self.client.post(self.endpoint()).json(&payload);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?.json::<SummarizationResponse>().await?;
        parse_response(response)
    }
}

fn parse_response(response: SummarizationResponse) -> Result<String> {
    match response {
        SummarizationResponse::Summaries(summaries) => summaries
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| Error::Inference("Empty response from summarization model".to_string())),
        SummarizationResponse::Error { error } => Err(Error::Inference(error)),
    }
}
