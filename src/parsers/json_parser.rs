use super::{extract_urls_from_json, filter_links, is_url_like, resolve};
use crate::domain::ports::{LinkFilter, Parser};
use crate::utils::error::{Result, ScoutError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

const URL_PATTERN: &str = r"(?:https?://|www\.|/)[\w\-./~:?#\[\]@!$&'()*+,;=]+";

/// Extracts links from JSON API payloads, falling back to a URL scan of arbitrary text.
pub struct JsonParser {
    link_filter: Arc<dyn LinkFilter>,
    url_regex: Regex,
}

impl JsonParser {
    pub fn new(link_filter: Arc<dyn LinkFilter>) -> Result<Self> {
        let url_regex = Regex::new(URL_PATTERN).map_err(|e| ScoutError::ParseError {
            message: format!("Invalid URL pattern: {}", e),
        })?;

        Ok(Self {
            link_filter,
            url_regex,
        })
    }

    fn extract_urls_from_text(&self, text: &str, base_url: &str) -> HashSet<String> {
        self.url_regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|candidate| is_url_like(candidate))
            .filter_map(|candidate| resolve(base_url, candidate))
            .collect()
    }
}

impl Parser for JsonParser {
    fn name(&self) -> &str {
        "json"
    }

    fn extract_links(&self, content: &str, base_url: &str) -> Result<HashSet<String>> {
        let links = match serde_json::from_str::<serde_json::Value>(content) {
            Ok(data) => extract_urls_from_json(&data, base_url),
            Err(_) => self.extract_urls_from_text(content, base_url),
        };

        Ok(filter_links(self.link_filter.as_ref(), links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::JobLinkFilter;
    use crate::parsers::test_support::MockLinkFilter;

    const SAMPLE_JSON: &str = r#"
    {
        "jobs": [
            {"id": 1, "url": "/jobs/123", "title": "Software Engineer"},
            {"id": 2, "url": "/careers/456", "title": "Data Scientist"}
        ]
    }
    "#;

    fn accept_all() -> JsonParser {
        JsonParser::new(Arc::new(MockLinkFilter { should_match: true })).unwrap()
    }

    #[test]
    fn test_extract_from_json() {
        let links = accept_all()
            .extract_links(SAMPLE_JSON, "https://example.com")
            .unwrap();

        assert!(links.contains("https://example.com/jobs/123"));
        assert!(links.contains("https://example.com/careers/456"));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_extract_from_text() {
        let text = r#"
        Check out our jobs at /jobs/123 and /careers/456
        Visit https://example.com/positions/789 for more info
        "#;

        let links = accept_all().extract_links(text, "https://example.com").unwrap();

        assert!(links.contains("https://example.com/jobs/123"));
        assert!(links.contains("https://example.com/careers/456"));
        assert!(links.contains("https://example.com/positions/789"));
    }

    #[test]
    fn test_nested_json_extraction() {
        let content = r#"
        {"data": {"company": {"careers": {"openings": [
            {"url": "/jobs/123"},
            {"url": "/jobs/456"}
        ]}}}}
        "#;

        let links = accept_all().extract_links(content, "https://example.com").unwrap();

        assert!(links.contains("https://example.com/jobs/123"));
        assert!(links.contains("https://example.com/jobs/456"));
    }

    #[test]
    fn test_filter_applied() {
        let parser = JsonParser::new(Arc::new(MockLinkFilter {
            should_match: false,
        }))
        .unwrap();

        let links = parser.extract_links(SAMPLE_JSON, "https://example.com").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_text_scan_with_job_filter() {
        let parser =
            JsonParser::new(Arc::new(JobLinkFilter::with_defaults().unwrap())).unwrap();
        let text = r#"{"jobs": [{"url": "https://jobs.ashbyhq.com/Sierra/123"}, BROKEN
            "other": "https://example.com/about", "link": "/careers/developer""#;

        let links = parser.extract_links(text, "https://example.com/careers").unwrap();

        let mut sorted: Vec<_> = links.into_iter().collect();
        sorted.sort();
        assert_eq!(
            sorted,
            vec![
                "https://example.com/careers/developer",
                "https://jobs.ashbyhq.com/Sierra/123",
            ]
        );
    }
}
