//! Entity-aware post-processing of summaries.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ns_core::{Entity, EntityLabel, EntityRecognizer, Summary};

pub mod patterns;

pub use patterns::PatternRecognizer;

/// Labels worth surfacing to a reader.
pub const USEFUL_LABELS: [EntityLabel; 5] = [
    EntityLabel::Person,
    EntityLabel::Org,
    EntityLabel::Gpe,
    EntityLabel::Date,
    EntityLabel::Event,
];

/// Outlet names that show up as organizations in nearly every article.
pub const NOISE_ENTITIES: [&str; 5] = ["BBC", "Reuters", "CNN", "AP", "BBC Verify"];

/// How entities are used around summarization. The two active strategies
/// are alternatives and are never combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStrategy {
    #[default]
    None,
    /// Append source entities the summary dropped
    Boost,
    /// Name people and dates ahead of the text before summarizing
    Emphasize,
}

impl FromStr for EntityStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "boost" => Ok(Self::Boost),
            "emphasize" => Ok(Self::Emphasize),
            _ => Err(format!("Unknown entity strategy: {}", s)),
        }
    }
}

pub struct EntityBooster {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl fmt::Debug for EntityBooster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityBooster")
            .field("recognizer", &"<dyn EntityRecognizer>")
            .finish()
    }
}

impl Default for EntityBooster {
    fn default() -> Self {
        Self::new(Arc::new(PatternRecognizer::new()))
    }
}

impl EntityBooster {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Useful, non-noise entities of `text`, deduplicated in order of first appearance.
    pub fn extract_named_entities(&self, text: &str) -> Vec<Entity> {
        let mut seen = HashSet::new();
        self.recognizer
            .recognize(text)
            .into_iter()
            .map(|e| Entity::new(e.text.trim(), e.label))
            .filter(|e| USEFUL_LABELS.contains(&e.label))
            .filter(|e| !e.text.is_empty() && !NOISE_ENTITIES.contains(&e.text.as_str()))
            .filter(|e| seen.insert(e.clone()))
            .collect()
    }

    /// Attach the entities of `source` that the summary never mentions.
    ///
    /// An entity counts as mentioned when the recognizer finds an entity with
    /// exactly the same text in the summary. Missing entities are sorted by
    /// label, then text.
    pub fn boost_summary(&self, source: &str, mut summary: Summary) -> Summary {
        let summary_texts: HashSet<String> = self
            .recognizer
            .recognize(&summary.text())
            .into_iter()
            .map(|e| e.text.trim().to_string())
            .collect();

        let mut missing: Vec<Entity> = self
            .extract_named_entities(source)
            .into_iter()
            .filter(|e| !summary_texts.contains(&e.text))
            .collect();
        missing.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.text.cmp(&b.text)));

        debug!("{} source entities missing from summary", missing.len());
        summary.missing_info = missing;
        summary
    }

    /// Prefix `text` with a sentence naming its people and dates.
    pub fn emphasize_named_entities(&self, text: &str) -> String {
        let mut seen = HashSet::new();
        let people_dates: Vec<String> = self
            .recognizer
            .recognize(text)
            .into_iter()
            .filter(|e| matches!(e.label, EntityLabel::Person | EntityLabel::Date))
            .map(|e| e.text.trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();

        if people_dates.is_empty() {
            return text.to_string();
        }
        format!(
            "This article includes key people and dates: {}.\n\n{}",
            people_dates.join(", "),
            text
        )
    }
}
