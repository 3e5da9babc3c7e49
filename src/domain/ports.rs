use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Retrieves the content behind a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &str;

    async fn get(&self, url: &str) -> Result<String>;

    /// Releases held resources (browser processes, pooled connections).
    async fn cleanup(&self) -> Result<()> {
        Ok(())
    }
}

/// Extracts candidate links from fetched content.
pub trait Parser: Send + Sync {
    fn name(&self) -> &str;

    /// Returns absolute URLs that passed the parser's link filter.
    fn extract_links(&self, content: &str, base_url: &str) -> Result<HashSet<String>>;

    fn count_links(&self, content: &str, base_url: &str) -> Result<usize> {
        Ok(self.extract_links(content, base_url)?.len())
    }
}

/// Decides whether a URL is a link worth keeping.
pub trait LinkFilter: Send + Sync {
    fn looks_like_target(&self, url: &str) -> bool;

    fn filter_urls(&self, urls: &[String]) -> Vec<String> {
        urls.iter()
            .filter(|url| self.looks_like_target(url))
            .cloned()
            .collect()
    }

    fn count_matches(&self, urls: &[String]) -> usize {
        urls.iter().filter(|url| self.looks_like_target(url)).count()
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
