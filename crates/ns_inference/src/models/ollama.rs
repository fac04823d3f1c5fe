use std::fmt;
use async_trait::async_trait;
use url::Url;
use ns_core::{Result, SummarizationModel, SummaryRequest};

#[cfg(feature = "ollama")]
use {
    anyhow::anyhow,
    langchain_rust::language_models::llm::LLM,
    langchain_rust::llm::client::GenerationOptions,
    langchain_rust::llm::ollama::client::{Ollama, OllamaClient},
    ns_core::Error,
    std::sync::Arc,
};

const DEFAULT_URL: &str = "http://localhost:11434/llama3.2";

#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    ollama_host: String,
    ollama_port: u16,
    model_name: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            ollama_host: "http://localhost".to_string(),
            ollama_port: 11434,
            model_name: "llama3.2".to_string(),
        }
    }
}

impl OllamaConfig {
    /// Parse `scheme://host:port/model`; missing parts fall back to the defaults.
    pub fn from_url(url: Option<&str>, model_name: Option<&str>) -> Result<Self> {
        let defaults = Self::default();
        let parsed = Url::parse(url.unwrap_or(DEFAULT_URL))?;

        let path_model = parsed.path().trim_start_matches('/').to_string();
        let model_name = model_name
            .map(str::to_string)
            .or_else(|| (!path_model.is_empty()).then_some(path_model))
            .unwrap_or(defaults.model_name);

        Ok(Self {
            ollama_host: format!("{}://{}", parsed.scheme(), parsed.host_str().unwrap_or("localhost")),
            ollama_port: parsed.port().unwrap_or(defaults.ollama_port),
            model_name,
        })
    }

    pub fn host(&self) -> &str {
        &self.ollama_host
    }

    pub fn port(&self) -> u16 {
        self.ollama_port
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Token budget for a summary of at most `max_length` words, roughly 4
/// tokens for every 3 words.
fn token_budget(request: &SummaryRequest) -> i32 {
    i32::try_from(request.max_length * 4 / 3 + 1).unwrap_or(i32::MAX)
}

fn temperature(request: &SummaryRequest) -> f32 {
    if request.do_sample {
        0.7
    } else {
        0.0
    }
}

/// Summarization through a local Ollama server, via langchain-rust.
///
/// Requests need the `ollama` feature; without it the model still builds
/// but every call fails with an inference error.
pub struct OllamaModel {
    config: OllamaConfig,
    #[cfg(feature = "ollama")]
    client: Arc<OllamaClient>,
}

impl fmt::Debug for OllamaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaModel")
            .field("config", &self.config)
            .field("client", &"<Ollama>")
            .finish()
    }
}

impl OllamaModel {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            #[cfg(feature = "ollama")]
            client: Arc::new(OllamaClient::new(config.ollama_host.clone(), config.ollama_port)),
            config,
        }
    }

    fn prompt(text: &str, request: &SummaryRequest) -> String {
        format!(
            "Summarize the following news text in plain prose between {} and {} words. \
             Keep names, places and dates. Reply with the summary only.\n\n{}",
            request.min_length, request.max_length, text
        )
    }

    #[cfg(feature = "ollama")]
    fn llm(&self, request: &SummaryRequest) -> Ollama {
        let options = GenerationOptions::default()
            .temperature(temperature(request))
            .num_predict(token_budget(request));
        Ollama::new(self.client.clone(), self.config.model_name.clone(), Some(options))
    }
}

#[async_trait]
impl SummarizationModel for OllamaModel {
    fn name(&self) -> &str {
        self.config.model_name()
    }

    #[cfg(feature = "ollama")]
    async fn summarize(&self, text: &str, request: &SummaryRequest) -> Result<String> {
        self.llm(request)
            .invoke(&Self::prompt(text, request))
            .await
            .map_err(|e| {
                Error::External(anyhow!(
                    "Ollama is not available at {}:{}: {}. Please ensure Ollama is running and the model '{}' is installed.",
                    self.config.ollama_host,
                    self.config.ollama_port,
                    e,
                    self.config.model_name
                ))
            })
    }

    #[cfg(not(feature = "ollama"))]
    async fn summarize(&self, _text: &str, _request: &SummaryRequest) -> Result<String> {
        Err(ns_core::Error::Inference(
            "the ollama backend needs the `ollama` feature (cargo build --features ollama)".to_string(),
        ))
    }
}
