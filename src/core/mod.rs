pub mod scraper;

pub use crate::domain::model::{DiscoveryReport, Link};
pub use crate::domain::ports::{Fetcher, LinkFilter, Parser, Storage};
pub use crate::utils::error::Result;
pub use scraper::{create_default_scraper, discover_blocking, Scraper};
