use crate::config::defaults;
use crate::domain::ports::LinkFilter;
use crate::utils::error::{Result, ScoutError};
use regex::{RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

/// Pattern lists behind [`JobLinkFilter`]. Custom lists replace the defaults wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRules {
    pub job_patterns: Vec<String>,
    pub job_boards: Vec<String>,
    pub excludes: Vec<String>,
    pub query_patterns: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            job_patterns: defaults::to_owned_list(defaults::JOB_PATTERNS),
            job_boards: defaults::to_owned_list(defaults::JOB_BOARDS),
            excludes: defaults::to_owned_list(defaults::EXCLUDES),
            query_patterns: defaults::to_owned_list(defaults::JOB_QUERY_PATTERNS),
        }
    }
}

/// Recognises job posting URLs by job-board domain, path shape and query parameters.
#[derive(Debug, Clone)]
pub struct JobLinkFilter {
    job_regex: RegexSet,
    exclude_regex: RegexSet,
    query_regex: RegexSet,
    job_boards: Vec<String>,
}

impl JobLinkFilter {
    pub fn new(rules: FilterRules) -> Result<Self> {
        Ok(Self {
            job_regex: compile("filter.job_patterns", &rules.job_patterns)?,
            exclude_regex: compile("filter.excludes", &rules.excludes)?,
            query_regex: compile("filter.query_patterns", &rules.query_patterns)?,
            job_boards: rules
                .job_boards
                .iter()
                .map(|board| board.trim().to_lowercase())
                .filter(|board| !board.is_empty())
                .collect(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(FilterRules::default())
    }

    fn matches_exclude_patterns(&self, url: &str) -> bool {
        self.exclude_regex.is_match(url)
    }

    /// `www.` is ignored and subdomains of a board count (`acme.lever.co` matches `lever.co`).
    pub fn is_job_board(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        let domain = domain.strip_prefix("www.").unwrap_or(&domain);

        self.job_boards.iter().any(|board| {
            domain == board
                || domain
                    .strip_suffix(board.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    fn matches_job_patterns(&self, path: &str) -> bool {
        self.job_regex.is_match(path)
    }

    fn matches_query_patterns(&self, query: &str) -> bool {
        self.query_regex.is_match(query)
    }
}

impl LinkFilter for JobLinkFilter {
    fn looks_like_target(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        let host = match parsed.host_str() {
            Some(host) if !host.is_empty() => host,
            _ => return false,
        };

        if self.matches_exclude_patterns(url) {
            return false;
        }

        // a port or userinfo makes the authority something other than the board itself
        let bare_authority =
            parsed.port().is_none() && parsed.username().is_empty() && parsed.password().is_none();
        if bare_authority && self.is_job_board(host) {
            return true;
        }

        if self.matches_job_patterns(parsed.path()) {
            return true;
        }

        parsed
            .query()
            .is_some_and(|query| self.matches_query_patterns(query))
    }
}

fn compile(field: &str, patterns: &[String]) -> Result<RegexSet> {
    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .build()
        .map_err(|e| ScoutError::ConfigValidationError {
            field: field.to_string(),
            message: format!("Invalid regular expression: {}", e),
        })
}
