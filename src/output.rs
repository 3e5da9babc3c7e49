//! Rendering discovery reports and writing them out.

use crate::config::defaults;
use crate::domain::model::DiscoveryReport;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", defaults::OUTPUT_FILE_STEM, self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

pub fn render(reports: &[DiscoveryReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Csv => render_csv(reports),
    }
}

fn render_text(reports: &[DiscoveryReport]) -> String {
    let mut out = String::new();

    for report in reports {
        out.push_str(&format!(
            "# {} ({} links)\n",
            report.source_url,
            report.links.len()
        ));
        for link in &report.links {
            out.push_str(link);
            out.push('\n');
        }
    }

    out
}

fn render_csv(reports: &[DiscoveryReport]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["source_url", "link", "fetched_by", "discovered_at"])?;

    for report in reports {
        let fetched_by = report.fetched_by.as_deref().unwrap_or("");
        let discovered_at = report.discovered_at.to_rfc3339();
        for link in &report.links {
            writer.write_record([
                report.source_url.as_str(),
                link.as_str(),
                fetched_by,
                discovered_at.as_str(),
            ])?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| ScoutError::OutputError {
        message: format!("Failed to flush CSV writer: {}", e),
    })?;

    String::from_utf8(bytes).map_err(|e| ScoutError::OutputError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// Writes the rendered reports to `job_links.<ext>` and returns the full path.
pub async fn write_reports<S: Storage>(
    storage: &S,
    base_path: &str,
    reports: &[DiscoveryReport],
    format: OutputFormat,
) -> Result<String> {
    let rendered = render(reports, format)?;
    let file_name = format.file_name();

    tracing::debug!("Writing {} bytes to {}", rendered.len(), file_name);
    storage.write_file(&file_name, rendered.as_bytes()).await?;

    Ok(Path::new(base_path)
        .join(&file_name)
        .to_string_lossy()
        .into_owned())
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
