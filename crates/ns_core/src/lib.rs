pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, Result};
pub use models::{EntityRecognizer, PageFetcher, SummarizationModel, SummaryRequest};
pub use types::{
    Article, ArticleSummary, Entity, EntityLabel, HeadlinePair, PdfSummary, SectionSummary,
    Summary,
};
