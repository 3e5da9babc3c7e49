use super::{extract_urls_from_json, filter_links, resolve};
use crate::domain::ports::{LinkFilter, Parser};
use crate::utils::error::{Result, ScoutError};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;

/// Pulls links out of `<a href>` anchors and JSON-LD (`schema.org/JobPosting`) blocks.
pub struct HtmlParser {
    link_filter: Arc<dyn LinkFilter>,
    anchor_selector: Selector,
    jsonld_selector: Selector,
}

impl HtmlParser {
    pub fn new(link_filter: Arc<dyn LinkFilter>) -> Result<Self> {
        Ok(Self {
            link_filter,
            anchor_selector: selector("a[href]")?,
            jsonld_selector: selector(r#"script[type="application/ld+json"]"#)?,
        })
    }

    fn extract_anchor_links(&self, document: &Html, base_url: &str) -> HashSet<String> {
        document
            .select(&self.anchor_selector)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter(|href| !href.trim().is_empty())
            .filter_map(|href| resolve(base_url, href))
            .collect()
    }

    fn extract_jsonld_links(&self, document: &Html, base_url: &str) -> HashSet<String> {
        let mut links = HashSet::new();

        for script in document.select(&self.jsonld_selector) {
            let body: String = script.text().collect();
            if body.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(data) => links.extend(extract_urls_from_json(&data, base_url)),
                Err(e) => {
                    tracing::debug!("Skipping malformed JSON-LD block on {}: {}", base_url, e);
                }
            }
        }

        links
    }
}

impl Parser for HtmlParser {
    fn name(&self) -> &str {
        "html"
    }

    fn extract_links(&self, content: &str, base_url: &str) -> Result<HashSet<String>> {
        let document = Html::parse_document(content);

        let mut links = self.extract_anchor_links(&document, base_url);
        links.extend(self.extract_jsonld_links(&document, base_url));

        Ok(filter_links(self.link_filter.as_ref(), links))
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScoutError::ParseError {
        message: format!("Invalid CSS selector '{}': {:?}", css, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::JobLinkFilter;
    use crate::parsers::test_support::MockLinkFilter;

    const BASE_URL: &str = "https://example.com/careers";

    fn job_parser() -> HtmlParser {
        HtmlParser::new(Arc::new(JobLinkFilter::with_defaults().unwrap())).unwrap()
    }

    #[test]
    fn test_extract_anchor_links() {
        let html = r#"
        <html>
            <body>
                <a href="/jobs/engineer">Software Engineer</a>
                <a href="https://jobs.ashbyhq.com/Company/123">External Job</a>
                <a href="/about">About Us</a>
            </body>
        </html>
        "#;

        let links = job_parser().extract_links(html, BASE_URL).unwrap();

        let expected: HashSet<String> = [
            "https://example.com/jobs/engineer",
            "https://jobs.ashbyhq.com/Company/123",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(links, expected);
    }

    #[test]
    fn test_relative_anchors_resolve_against_page() {
        let html = r##"
            <a href="jobs/developer">Developer</a>
            <a href="/careers/manager">Manager</a>
            <a href="#section">Section Link</a>
            <a href="">Empty</a>
        "##;

        let links = job_parser().extract_links(html, BASE_URL).unwrap();

        assert_eq!(links.len(), 2);
        assert!(links.contains("https://example.com/jobs/developer"));
        assert!(links.contains("https://example.com/careers/manager"));
    }

    #[test]
    fn test_extract_jsonld_links() {
        let html = r#"
        <html>
            <head>
                <script type="application/ld+json">
                {
                    "@context": "https://schema.org",
                    "@type": "JobPosting",
                    "url": "https://example.com/jobs/software-engineer",
                    "title": "Software Engineer"
                }
                </script>
                <script type="application/ld+json">
                {
                    "jobs": [
                        {"jobUrl": "https://jobs.ashbyhq.com/Company/123"},
                        {"url": "/careers/manager"}
                    ]
                }
                </script>
            </head>
        </html>
        "#;

        let links = job_parser().extract_links(html, BASE_URL).unwrap();

        assert_eq!(links.len(), 3);
        assert!(links.contains("https://example.com/jobs/software-engineer"));
        assert!(links.contains("https://jobs.ashbyhq.com/Company/123"));
        assert!(links.contains("https://example.com/careers/manager"));
    }

    #[test]
    fn test_malformed_jsonld_is_skipped() {
        let html = r#"
            <script type="application/ld+json">{ malformed json here</script>
            <script type="application/ld+json">
                {"valid": "json", "jobUrl": "https://example.com/jobs/valid"}
            </script>
        "#;

        let links = job_parser().extract_links(html, BASE_URL).unwrap();

        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/jobs/valid"));
    }

    #[test]
    fn test_full_page_mixed_sources() {
        let html = r#"
        <html>
            <head>
                <script type="application/ld+json">
                {"@type": "JobPosting", "url": "https://example.com/jobs/schema-job"}
                </script>
            </head>
            <body>
                <a href="/jobs/software-engineer">Software Engineer</a>
                <a href="https://jobs.ashbyhq.com/Company/123">External Job</a>
                <a href="/careers/product-manager">Product Manager</a>
                <a href="/about">About Us</a>
                <a href="/blog/post">Blog Post</a>
                <a href="mailto:jobs@company.com">Email</a>
                <a href="/openings/designer">Designer</a>
                <a href="/contact">Contact</a>
            </body>
        </html>
        "#;

        let links = job_parser().extract_links(html, BASE_URL).unwrap();

        let mut sorted: Vec<_> = links.into_iter().collect();
        sorted.sort();
        assert_eq!(
            sorted,
            vec![
                "https://example.com/careers/product-manager",
                "https://example.com/jobs/schema-job",
                "https://example.com/jobs/software-engineer",
                "https://example.com/openings/designer",
                "https://jobs.ashbyhq.com/Company/123",
            ]
        );
    }

    #[test]
    fn test_filter_applied() {
        let parser = HtmlParser::new(Arc::new(MockLinkFilter {
            should_match: false,
        }))
        .unwrap();

        let html = r#"<a href="/jobs/123">Job</a>"#;
        assert!(parser.extract_links(html, BASE_URL).unwrap().is_empty());
        assert_eq!(parser.count_links(html, BASE_URL).unwrap(), 0);
    }
}
