pub mod config;
pub mod core;
pub mod domain;
pub mod fetchers;
pub mod filters;
pub mod output;
pub mod parsers;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ScoutConfig;
pub use crate::core::{create_default_scraper, discover_blocking, Scraper};
pub use domain::model::DiscoveryReport;
pub use filters::{FilterRules, JobLinkFilter};
pub use output::{LocalStorage, OutputFormat};
pub use utils::error::{Result, ScoutError};
