use crate::config::ScoutConfig;
use crate::domain::model::{DiscoveryReport, Link};
use crate::domain::ports::{Fetcher, LinkFilter, Parser};
use crate::fetchers::HttpFetcher;
use crate::filters::JobLinkFilter;
use crate::parsers::{HtmlParser, JsonParser};
use crate::utils::error::{Result, ScoutError};
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Coordinates fetchers, parsers and the link filter for one careers page at a time.
///
/// Fetchers are tried in order. The first one whose content yields at least one
/// link wins; every parser runs on that content and the results are unioned.
/// Failures of individual fetchers or parsers are logged and skipped, so
/// discovery itself never fails.
pub struct Scraper {
    fetchers: Vec<Box<dyn Fetcher>>,
    parsers: Vec<Box<dyn Parser>>,
    link_filter: Arc<dyn LinkFilter>,
}

impl Scraper {
    pub fn new(
        fetchers: Vec<Box<dyn Fetcher>>,
        parsers: Vec<Box<dyn Parser>>,
        link_filter: Arc<dyn LinkFilter>,
    ) -> Self {
        Self {
            fetchers,
            parsers,
            link_filter,
        }
    }

    pub fn fetcher_names(&self) -> Vec<&str> {
        self.fetchers.iter().map(|f| f.name()).collect()
    }

    pub fn parser_names(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }

    pub fn link_filter(&self) -> &Arc<dyn LinkFilter> {
        &self.link_filter
    }

    /// Sorted, de-duplicated job links found on `url`.
    pub async fn discover(&self, url: &str) -> Vec<Link> {
        self.discover_report(url).await.links
    }

    pub async fn discover_report(&self, url: &str) -> DiscoveryReport {
        let mut all_links: BTreeSet<Link> = BTreeSet::new();
        let mut fetched_by = None;

        for fetcher in &self.fetchers {
            tracing::debug!("Trying fetcher {} for {}", fetcher.name(), url);

            let content = match fetcher.get(url).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!("Fetcher {} failed: {}", fetcher.name(), e);
                    continue;
                }
            };

            for parser in &self.parsers {
                match parser.extract_links(&content, url) {
                    Ok(links) => {
                        tracing::debug!("Parser {} found {} links", parser.name(), links.len());
                        all_links.extend(links);
                    }
                    Err(e) => tracing::debug!("Parser {} failed: {}", parser.name(), e),
                }
            }

            if !all_links.is_empty() {
                fetched_by = Some(fetcher.name().to_string());
                break;
            }
        }

        tracing::info!("🔎 {}: {} job links", url, all_links.len());

        DiscoveryReport {
            source_url: url.to_string(),
            links: all_links.into_iter().collect(),
            fetched_by,
            discovered_at: Utc::now(),
        }
    }

    /// Scans several careers pages with at most `concurrency` in flight.
    /// Reports come back in the order of `urls`.
    pub async fn discover_many(
        self: Arc<Self>,
        urls: &[String],
        concurrency: usize,
    ) -> Vec<DiscoveryReport> {
        let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, url) in urls.iter().cloned().enumerate() {
            let scraper = Arc::clone(&self);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, scraper.discover_report(&url).await)
            });
        }

        let mut results: Vec<Option<DiscoveryReport>> = vec![None; urls.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, report)) => results[index] = Some(report),
                Err(e) => tracing::warn!("Discovery task failed: {}", e),
            }
        }

        results
            .into_iter()
            .zip(urls)
            .map(|(report, url)| report.unwrap_or_else(|| DiscoveryReport::empty(url)))
            .collect()
    }

    /// Releases fetcher resources. Errors are logged, never returned.
    pub async fn cleanup(&self) {
        for fetcher in &self.fetchers {
            if let Err(e) = fetcher.cleanup().await {
                tracing::debug!("Error cleaning up fetcher {}: {}", fetcher.name(), e);
            }
        }
    }
}

/// Static HTTP fetcher first, then the headless browser when compiled in and enabled.
/// HTML and JSON parsers share one [`JobLinkFilter`].
pub fn create_default_scraper(config: &ScoutConfig) -> Result<Scraper> {
    let link_filter: Arc<dyn LinkFilter> = Arc::new(JobLinkFilter::new(config.filter_rules())?);

    #[cfg_attr(not(feature = "browser"), allow(unused_mut))]
    let mut fetchers: Vec<Box<dyn Fetcher>> = vec![Box::new(HttpFetcher::new(
        config.http_timeout(),
        config.user_agent(),
    )?)];

    if config.browser_enabled() {
        #[cfg(feature = "browser")]
        fetchers.push(Box::new(crate::fetchers::BrowserFetcher::new(
            config.browser_settings(),
        )));

        #[cfg(not(feature = "browser"))]
        tracing::debug!("Browser fallback requested but not compiled in (feature \"browser\")");
    }

    let parsers: Vec<Box<dyn Parser>> = vec![
        Box::new(HtmlParser::new(Arc::clone(&link_filter))?),
        Box::new(JsonParser::new(Arc::clone(&link_filter))?),
    ];

    Ok(Scraper::new(fetchers, parsers, link_filter))
}

/// Blocking one-shot discovery with the default configuration.
///
/// Must not be called from inside an async runtime.
pub fn discover_blocking(url: &str) -> Result<Vec<Link>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let scraper = create_default_scraper(&ScoutConfig::default())?;
        let links = scraper.discover(url).await;
        scraper.cleanup().await;
        Ok::<_, ScoutError>(links)
    })
}
