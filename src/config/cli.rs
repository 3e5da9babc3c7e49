use crate::config::ScoutConfig;
use crate::output::OutputFormat;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "skill-diff")]
#[command(about = "Discover job posting links from company careers pages")]
pub struct CliConfig {
    /// Careers page URLs to scan
    #[arg(required = true, num_args = 1..)]
    pub urls: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory to write job_links.<ext> into; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// How many careers pages to scan at once
    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip the headless browser fallback
    #[arg(long)]
    pub no_browser: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the config file (if any) and layers command-line overrides on top.
    pub fn resolve(&self) -> Result<ScoutConfig> {
        let mut config = match &self.config {
            Some(path) => ScoutConfig::from_file(path)?,
            None => ScoutConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ScoutConfig) {
        if let Some(format) = self.format {
            config.output.format = Some(format);
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.discovery.concurrent_requests = Some(concurrent);
        }
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = Some(timeout);
        }
        if self.no_browser {
            config.browser.enabled = Some(false);
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.urls.is_empty() {
            return Err(ScoutError::MissingConfigError {
                field: "urls".to_string(),
            });
        }
        for url in &self.urls {
            validation::validate_url("urls", url)?;
        }
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        if let Some(concurrent) = self.concurrent_requests {
            validation::validate_positive_number("concurrent_requests", concurrent, 1)?;
        }
        Ok(())
    }
}
