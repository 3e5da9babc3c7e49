use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Absolute URL as a string.
pub type Link = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub source_url: String,
    pub links: Vec<Link>,
    /// Fetcher whose content produced the links; `None` when nothing was found.
    pub fetched_by: Option<String>,
    pub discovered_at: DateTime<Utc>,
}

impl DiscoveryReport {
    pub fn empty(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            links: Vec::new(),
            fetched_by: None,
            discovered_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
