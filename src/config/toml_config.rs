use crate::config::defaults;
use crate::fetchers::BrowserSettings;
use crate::filters::FilterRules;
use crate::output::OutputFormat;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Scraper configuration loaded from TOML. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub enabled: Option<bool>,
    pub headless: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub job_patterns: Option<Vec<String>>,
    pub job_boards: Option<Vec<String>>,
    pub excludes: Option<Vec<String>>,
    pub query_patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

impl ScoutConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            ScoutError::ConfigValidationError {
                field: "env_substitution".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range("http.timeout_seconds", self.http_timeout().as_secs(), 1, 600)?;
        validation::validate_non_empty_string("http.user_agent", self.user_agent())?;
        validation::validate_range(
            "browser.timeout_seconds",
            self.browser_settings().timeout.as_secs(),
            1,
            600,
        )?;
        validation::validate_positive_number(
            "discovery.concurrent_requests",
            self.concurrent_requests(),
            1,
        )?;

        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        let rules = self.filter_rules();
        validation::validate_patterns("filter.job_patterns", &rules.job_patterns)?;
        validation::validate_patterns("filter.excludes", &rules.excludes)?;
        validation::validate_patterns("filter.query_patterns", &rules.query_patterns)?;

        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(
            self.http
                .timeout_seconds
                .unwrap_or(defaults::HTTP_TIMEOUT_SECS),
        )
    }

    pub fn user_agent(&self) -> &str {
        self.http.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    pub fn browser_enabled(&self) -> bool {
        self.browser.enabled.unwrap_or(true)
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        let fallback = BrowserSettings::default();
        BrowserSettings {
            headless: self.browser.headless.unwrap_or(fallback.headless),
            args: self.browser.args.clone().unwrap_or(fallback.args),
            timeout: self
                .browser
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(fallback.timeout),
        }
    }

    pub fn filter_rules(&self) -> FilterRules {
        let fallback = FilterRules::default();
        FilterRules {
            job_patterns: self
                .filter
                .job_patterns
                .clone()
                .unwrap_or(fallback.job_patterns),
            job_boards: self.filter.job_boards.clone().unwrap_or(fallback.job_boards),
            excludes: self.filter.excludes.clone().unwrap_or(fallback.excludes),
            query_patterns: self
                .filter
                .query_patterns
                .clone()
                .unwrap_or(fallback.query_patterns),
        }
    }

    pub fn concurrent_requests(&self) -> usize {
        self.discovery
            .concurrent_requests
            .unwrap_or(defaults::CONCURRENT_REQUESTS)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }
}

impl Validate for ScoutConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
