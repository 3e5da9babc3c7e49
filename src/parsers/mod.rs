//! Link extraction from fetched page content.
//!
//! Every parser resolves candidates against the page URL and keeps only what
//! its [`LinkFilter`] accepts.

pub mod html_parser;
pub mod json_parser;

pub use html_parser::HtmlParser;
pub use json_parser::JsonParser;

use crate::domain::ports::LinkFilter;
use serde_json::Value;
use std::collections::HashSet;
use url::Url;

pub fn is_url_like(text: &str) -> bool {
    if ["http://", "https://", "/", "./", "../"]
        .iter()
        .any(|prefix| text.starts_with(prefix))
    {
        return true;
    }

    text.contains('.') && text.contains('/') && text.chars().count() > 5
}

/// Joins `href` onto `base_url`; `None` when either side cannot be resolved.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    base.join(href.trim()).ok().map(String::from)
}

/// Collects every URL-like string leaf of a JSON document.
pub fn extract_urls_from_json(data: &Value, base_url: &str) -> HashSet<String> {
    let mut links = HashSet::new();
    collect_json_urls(data, base_url, &mut links);
    links
}

fn collect_json_urls(data: &Value, base_url: &str, links: &mut HashSet<String>) {
    match data {
        Value::Object(map) => {
            for value in map.values() {
                collect_json_urls(value, base_url, links);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_json_urls(item, base_url, links);
            }
        }
        Value::String(s) if is_url_like(s) => {
            if let Some(absolute) = resolve(base_url, s) {
                links.insert(absolute);
            }
        }
        _ => {}
    }
}

pub(crate) fn filter_links(filter: &dyn LinkFilter, links: HashSet<String>) -> HashSet<String> {
    links
        .into_iter()
        .filter(|link| filter.looks_like_target(link))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::ports::LinkFilter;

    pub struct MockLinkFilter {
        pub should_match: bool,
    }

    impl LinkFilter for MockLinkFilter {
        fn looks_like_target(&self, _url: &str) -> bool {
            self.should_match
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_like_detection() {
        assert!(is_url_like("https://example.com/jobs/123"));
        assert!(is_url_like("/jobs/123"));
        assert!(is_url_like("./jobs/123"));
        assert!(is_url_like("../jobs/123"));
        assert!(is_url_like("example.com/jobs/123"));

        assert!(!is_url_like("just text"));
        assert!(!is_url_like("123"));
        assert!(!is_url_like("test"));
        assert!(!is_url_like("a.b/c"));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("https://example.com/careers", "jobs/developer").as_deref(),
            Some("https://example.com/jobs/developer")
        );
        assert_eq!(
            resolve("https://example.com/careers", "/jobs/1").as_deref(),
            Some("https://example.com/jobs/1")
        );
        assert_eq!(
            resolve("https://example.com", "https://jobs.lever.co/acme/1").as_deref(),
            Some("https://jobs.lever.co/acme/1")
        );
        assert_eq!(resolve("not a base", "/jobs/1"), None);
    }

    #[test]
    fn test_extract_urls_from_nested_json() {
        let data = json!({
            "data": {
                "openings": [
                    {"url": "/jobs/123", "id": 1},
                    {"url": "https://jobs.ashbyhq.com/Acme/456"}
                ],
                "title": "not a url",
                "active": true
            }
        });

        let links = extract_urls_from_json(&data, "https://example.com");

        assert_eq!(links.len(), 2);
        assert!(links.contains("https://example.com/jobs/123"));
        assert!(links.contains("https://jobs.ashbyhq.com/Acme/456"));
    }
}
