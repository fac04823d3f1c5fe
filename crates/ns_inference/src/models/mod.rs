use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::info;
use ns_core::{Result, SummarizationModel};
use crate::Config;

pub mod dummy;
pub mod huggingface;
pub mod ollama;

pub use dummy::DummyModel;
pub use huggingface::HuggingFaceModel;
pub use ollama::{OllamaConfig, OllamaModel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    #[default]
    HuggingFace,
    Ollama,
    Dummy,
}

impl FromStr for ModelBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            "dummy" => Ok(Self::Dummy),
            _ => Err(format!(
                "Unknown model backend: {}. Available models: huggingface (default), ollama, dummy",
                s
            )),
        }
    }
}

impl fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HuggingFace => "huggingface",
            Self::Ollama => "ollama",
            Self::Dummy => "dummy",
        };
        f.write_str(name)
    }
}

/// Build the model handle shared by every request of the process.
pub fn create_model(config: &Config) -> Result<Arc<dyn SummarizationModel>> {
    let model: Arc<dyn SummarizationModel> = match config.backend {
        ModelBackend::HuggingFace => Arc::new(HuggingFaceModel::new(
            config.api_key.clone(),
            config.model_name.clone(),
            config.model_url.clone(),
        )?),
        ModelBackend::Ollama => Arc::new(OllamaModel::new(OllamaConfig::from_url(
            config.model_url.as_deref(),
            config.model_name.as_deref(),
        )?)),
        ModelBackend::Dummy => Arc::new(DummyModel::new()),
    };
    info!("🧠 Summarization model ready ({} via {})", model.name(), config.backend);
    Ok(model)
}
