use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text pulled out of a web page or a PDF, ready to be summarized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: Option<String>,
    pub text: String,
    pub extracted_at: DateTime<Utc>,
}

impl Article {
    pub fn new(url: impl Into<String>, title: Option<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title,
            text: text.into(),
            extracted_at: Utc::now(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A headline found in PDF text together with the paragraph text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlinePair {
    pub headline: String,
    pub paragraph: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Date,
    Event,
    Gpe,
    Org,
    Person,
}

impl EntityLabel {
    pub const ALL: [EntityLabel; 5] = [
        EntityLabel::Date,
        EntityLabel::Event,
        EntityLabel::Gpe,
        EntityLabel::Org,
        EntityLabel::Person,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Date => "DATE",
            EntityLabel::Event => "EVENT",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Org => "ORG",
            EntityLabel::Person => "PERSON",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EntityLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown entity label: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Bullet-point summary, optionally followed by entities the model left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_info: Vec<Entity>,
}

impl Summary {
    pub fn new(bullets: Vec<String>) -> Self {
        Self {
            bullets,
            missing_info: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    /// The bullets as one block of text, as handed to the entity recognizer.
    pub fn text(&self) -> String {
        self.bullets.join("\n")
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bullet in &self.bullets {
            writeln!(f, "{}", bullet)?;
        }
        if !self.missing_info.is_empty() {
            writeln!(f)?;
            writeln!(f, "📌 Missing Key Info:")?;
            for entity in &self.missing_info {
                writeln!(f, "- {}: {}", entity.label, entity.text)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub url: String,
    pub title: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSummary {
    pub headline: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PdfSummary {
    /// Whole-document summary. `fell_back` is set when structured mode found no headlines.
    Full { summary: Summary, fell_back: bool },
    Sections { sections: Vec<SectionSummary> },
}
