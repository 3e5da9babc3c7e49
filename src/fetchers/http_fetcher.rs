use crate::config::defaults;
use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Static page fetcher: one GET, redirects followed, non-2xx treated as failure.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
            defaults::USER_AGENT,
        )
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn get(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {} (timeout {:?})", url, self.timeout);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScoutError::fetch(url, format!("HTTP error: {}", e)))?;

        let status = response.status();
        tracing::debug!("Response status for {}: {}", url, status);

        if !status.is_success() {
            return Err(ScoutError::fetch(url, format!("HTTP error: status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| ScoutError::fetch(url, format!("HTTP error reading body: {}", e)))
    }
}
