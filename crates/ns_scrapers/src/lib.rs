pub mod cli;
pub mod logging;
pub mod manager;
pub mod scrapers;
pub mod segmenter;

pub use cli::{handle_command, run_interactive, SummarizeArgs, SummarizeCommands};
pub use logging::{init_logging, Logger};
pub use manager::{PdfMode, SummaryManager};
pub use scrapers::{HttpFetcher, WebScraper};
pub use segmenter::extract_headlines_and_paragraphs;

pub mod prelude {
    pub use super::manager::{PdfMode, SummaryManager};
    pub use super::scrapers::{HttpFetcher, WebScraper};
    pub use ns_core::{Article, Error, Result, Summary};
}
