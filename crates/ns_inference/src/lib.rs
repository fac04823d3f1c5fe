use serde::{Deserialize, Serialize};

pub mod chunking;
pub mod entities;
pub mod models;
pub mod summarizer;

pub use entities::{EntityBooster, EntityStrategy, PatternRecognizer};
pub use models::{create_model, ModelBackend};
pub use summarizer::{Summarizer, SummarizerConfig};

/// Which summarization backend to build and how to reach it.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub backend: ModelBackend,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub model_url: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_model;
    pub use super::{EntityBooster, EntityStrategy, Summarizer, SummarizerConfig};
    pub use ns_core::{Error, Result, Summary};
}
