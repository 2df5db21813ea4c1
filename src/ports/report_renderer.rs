//! Report Renderer Port - Turns a report document into a downloadable file.
//!
//! Pagination, fonts and chart embedding are the renderer's concern. The
//! application layer only sees bytes, a content type and a filename.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::report::{ReportDocument, ReportError};

use super::ChartError;

/// Port for rendering report documents.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// The output format this renderer produces.
    fn format(&self) -> ReportFormat;

    /// Renders `document` into file bytes.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the chart cannot be fetched or conversion fails.
    async fn render(&self, document: &ReportDocument) -> Result<RenderedReport, RenderError>;
}

/// Output formats supported by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Html,
    Markdown,
}

impl ReportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Html => "text/html; charset=utf-8",
            ReportFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Pdf => write!(f, "pdf"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "html" | "htm" => Ok(ReportFormat::Html),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// A rendered report ready for download.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// The file content.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was produced.
    pub format: ReportFormat,
}

impl RenderedReport {
    /// Packages rendered bytes using the document's filename convention.
    pub fn new(content: Vec<u8>, format: ReportFormat, document: &ReportDocument) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: document.filename(format.extension()),
            format,
        }
    }
}

/// Errors that can occur while rendering a report.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Unsupported output format requested.
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    /// The chart image could not be produced.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// External converter (e.g., Pandoc) is not available.
    #[error("Render service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Conversion failed.
    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    /// Timeout during conversion.
    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    /// I/O error during rendering.
    #[error("I/O error during rendering: {0}")]
    Io(String),
}

impl From<RenderError> for ReportError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Chart(chart) => ReportError::Chart(chart.to_string()),
            other => ReportError::Render(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_format_content_types_are_correct() {
        assert_eq!(ReportFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(ReportFormat::Html.content_type(), "text/html; charset=utf-8");
        assert_eq!(ReportFormat::Markdown.content_type(), "text/markdown; charset=utf-8");
    }

    #[test]
    fn report_format_parses_from_string() {
        assert_eq!("PDF".parse::<ReportFormat>().unwrap(), ReportFormat::Pdf);
        assert_eq!("htm".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!(matches!(
            "docx".parse::<ReportFormat>(),
            Err(RenderError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn report_format_deserializes_from_snake_case() {
        let format: ReportFormat = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(format, ReportFormat::Html);
    }

    #[test]
    fn chart_failures_stay_retryable() {
        let err: ReportError = RenderError::Chart(ChartError::Transport("refused".into())).into();
        assert!(err.is_retryable());

        let err: ReportError = RenderError::Timeout(30).into();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn report_renderer_is_object_safe() {
        fn check<T: ReportRenderer + ?Sized>() {}
        check::<dyn ReportRenderer>();
    }
}
