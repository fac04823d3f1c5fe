use tracing::Level;
use std::sync::Once;
use std::collections::VecDeque;

static INIT: Once = Once::new();

/// Logger that tags every line with a stack of prefixes, e.g. `[3/20]` for
/// the article being processed and the section within it.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        let mut prefixes = self.prefixes.clone();
        prefixes.push_back(prefix.into());
        Self { prefixes }
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

/// Install the fmt subscriber once per process. Later calls, or a
/// subscriber installed elsewhere, are left alone.
pub fn init_logging(level: Level) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .try_init();
        });
    }
    Logger::new()
}
