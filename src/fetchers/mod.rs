pub mod http_fetcher;

#[cfg(feature = "browser")]
pub mod browser_fetcher;

pub use http_fetcher::HttpFetcher;

#[cfg(feature = "browser")]
pub use browser_fetcher::BrowserFetcher;

use crate::config::defaults;
use std::time::Duration;

/// Launch settings for the headless browser fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserSettings {
    pub headless: bool,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: defaults::BROWSER_HEADLESS,
            args: defaults::to_owned_list(defaults::BROWSER_ARGS),
            timeout: Duration::from_secs(defaults::BROWSER_TIMEOUT_SECS),
        }
    }
}

