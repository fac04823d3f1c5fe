use std::path::PathBuf;
use std::sync::Arc;
use ns_scrapers::SummaryManager;

pub const DEFAULT_PDF_DIR: &str = "pdfs";

/// Shared by every request: one manager (and so one model handle) per process.
pub struct AppState {
    pub manager: Arc<SummaryManager>,
    /// Where uploaded PDFs are written before extraction
    pub pdf_dir: PathBuf,
}

impl AppState {
    pub fn new(manager: Arc<SummaryManager>, pdf_dir: impl Into<PathBuf>) -> Self {
        Self {
            manager,
            pdf_dir: pdf_dir.into(),
        }
    }
}
