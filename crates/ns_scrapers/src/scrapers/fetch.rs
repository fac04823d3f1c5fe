use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use ns_core::{PageFetcher, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("ns/", env!("CARGO_PKG_VERSION"), " (news summarizer)");

/// Plain HTTP GET with a fixed request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
