//! Report generation configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::report::IndexNumbering;
use crate::ports::ReportFormat;

/// Report generation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Timeout in seconds applied to each persistence fetch
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// How table row indexes are numbered
    #[serde(default)]
    pub index_numbering: IndexNumbering,

    /// Output format of the report download
    #[serde(default)]
    pub format: ReportFormat,

    /// Path to the pandoc executable (PDF output)
    pub pandoc_path: Option<String>,

    /// PDF conversion timeout in seconds
    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

/// Sequential survey reads per report: form, template, questions, feedback.
const FETCH_STEPS: u64 = 4;

impl ReportConfig {
    /// Get fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Longest a report may take when every step runs to its timeout.
    ///
    /// The PDF conversion counts only when PDF is the output format.
    pub fn pipeline_budget(&self) -> Duration {
        let render = match self.format {
            ReportFormat::Pdf => self.pdf_timeout_secs,
            ReportFormat::Html | ReportFormat::Markdown => 0,
        };
        Duration::from_secs(FETCH_STEPS * self.fetch_timeout_secs + render)
    }

    /// Validate report configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fetch_timeout_secs == 0 || self.fetch_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.pandoc_path.as_ref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ValidationError::MissingRequired("REPORT__PANDOC_PATH"));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            index_numbering: IndexNumbering::default(),
            format: ReportFormat::default(),
            pandoc_path: None,
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_pdf_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_config_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.index_numbering, IndexNumbering::PerList);
        assert_eq!(config.format, ReportFormat::Pdf);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_budget_counts_pdf_only_for_pdf() {
        let pdf = ReportConfig::default();
        assert_eq!(pdf.pipeline_budget(), Duration::from_secs(4 * 10 + 60));

        let html = ReportConfig {
            format: ReportFormat::Html,
            ..Default::default()
        };
        assert_eq!(html.pipeline_budget(), Duration::from_secs(40));
    }

    #[test]
    fn test_validation_rejects_zero_fetch_timeout() {
        let config = ReportConfig {
            fetch_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_pandoc_path() {
        let config = ReportConfig {
            pandoc_path: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
