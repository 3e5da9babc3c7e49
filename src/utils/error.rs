use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Fetch failed for {url}: {message}")]
    FetchError { url: String, message: String },

    #[error("Browser error: {message}")]
    BrowserError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Output error: {message}")]
    OutputError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Configuration,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoutError {
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        ScoutError::FetchError {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoutError::HttpError(_)
            | ScoutError::FetchError { .. }
            | ScoutError::BrowserError { .. } => ErrorCategory::Network,
            ScoutError::ParseError { .. }
            | ScoutError::UrlError(_)
            | ScoutError::SerializationError(_) => ErrorCategory::Parsing,
            ScoutError::TomlError(_)
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScoutError::CsvError(_) | ScoutError::OutputError { .. } => ErrorCategory::Output,
            ScoutError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Parsing => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for an error that stopped the run. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoutError::HttpError(_) | ScoutError::FetchError { .. } => {
                "Check that the careers page is reachable and try again"
            }
            ScoutError::BrowserError { .. } => {
                "Make sure Chromium is installed, or rerun with --no-browser"
            }
            ScoutError::ParseError { .. } | ScoutError::SerializationError(_) => {
                "The page content could not be parsed; try the browser fetcher"
            }
            ScoutError::UrlError(_) => "Pass an absolute http(s) URL",
            ScoutError::TomlError(_) => "Fix the TOML syntax in the configuration file",
            ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => {
                "Review the configuration file and command-line arguments"
            }
            ScoutError::CsvError(_) | ScoutError::OutputError { .. } => {
                "Check the output format and destination"
            }
            ScoutError::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoutError::FetchError { url, .. } => format!("Could not fetch {}", url),
            ScoutError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            ScoutError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
