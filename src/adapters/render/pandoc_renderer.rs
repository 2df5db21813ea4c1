//! PDF renderer using Pandoc.
//!
//! Pandoc must be installed on the system. The chart image is written into a
//! scratch directory that lives only for the duration of one render, and the
//! Markdown references it by absolute path.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::ReportConfig;
use crate::domain::report::ReportDocument;
use crate::ports::{
    ChartImage, ChartImageProvider, RenderError, RenderedReport, ReportFormat, ReportRenderer,
};

use super::{comparison_chart, MarkdownReport};

/// Renders reports to PDF through an external Pandoc process.
#[derive(Clone)]
pub struct PandocReportRenderer {
    chart: Option<Arc<dyn ChartImageProvider>>,

    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,

    /// Timeout for PDF conversion in seconds.
    pdf_timeout_secs: u64,
}

impl PandocReportRenderer {
    pub fn new() -> Self {
        Self {
            chart: None,
            pandoc_path: None,
            pdf_timeout_secs: 60,
        }
    }

    /// Settings from the `report` configuration section.
    pub fn from_config(config: &ReportConfig) -> Self {
        let renderer = Self::new().with_pdf_timeout(config.pdf_timeout_secs);
        match &config.pandoc_path {
            Some(path) => renderer.with_pandoc_path(path.clone()),
            None => renderer,
        }
    }

    pub fn with_chart_provider(mut self, provider: Arc<dyn ChartImageProvider>) -> Self {
        self.chart = Some(provider);
        self
    }

    /// Set a custom path to the Pandoc executable.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    /// Set the timeout for PDF conversion.
    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    /// Check if Pandoc is installed and accessible.
    async fn check_pandoc(&self) -> bool {
        let output = Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        output.map(|o| o.status.success()).unwrap_or(false)
    }

    async fn write_chart(dir: &Path, image: &ChartImage) -> Result<String, RenderError> {
        let path = dir.join(format!("chart.{}", image.extension()));
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| RenderError::Io(format!("Failed to write chart image: {}", e)))?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn to_pdf(&self, markdown: &str, resource_dir: &Path) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(self.pandoc_command())
            .args([
                "-f",
                "markdown",
                "-t",
                "pdf",
                "--pdf-engine=xelatex",
                "-V",
                "geometry:margin=2cm",
                "-V",
                "fontsize=10pt",
            ])
            .arg(format!("--resource-path={}", resource_dir.display()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RenderError::ConversionFailed(format!("Failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(markdown.as_bytes()).await.map_err(|e| {
                RenderError::ConversionFailed(format!("Failed to write to Pandoc: {}", e))
            })?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| RenderError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| RenderError::ConversionFailed(format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::ConversionFailed(format!(
                "Pandoc returned error: {}",
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

impl Default for PandocReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRenderer for PandocReportRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    async fn render(&self, document: &ReportDocument) -> Result<RenderedReport, RenderError> {
        if !self.check_pandoc().await {
            return Err(RenderError::ServiceUnavailable(
                "Pandoc is not installed. PDF reports require Pandoc.".to_string(),
            ));
        }

        let scratch = tempfile::tempdir()
            .map_err(|e| RenderError::Io(format!("Failed to create scratch directory: {}", e)))?;

        let chart_path = match comparison_chart(self.chart.as_ref(), document).await? {
            Some(image) => Some(Self::write_chart(scratch.path(), &image).await?),
            None => None,
        };

        let markdown = MarkdownReport::compose(document, chart_path.as_deref());
        let pdf = self.to_pdf(&markdown, scratch.path()).await?;
        tracing::debug!(bytes = pdf.len(), "PDF rendered");

        Ok(RenderedReport::new(pdf, ReportFormat::Pdf, document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FormId, Timestamp};
    use crate::domain::report::{ReportStatistics, Respondent};

    fn document() -> ReportDocument {
        ReportDocument {
            form_id: FormId::new(),
            respondent: Respondent {
                full_name: "Jane Doe".to_string(),
                position: String::new(),
                gender_salutation: String::new(),
            },
            template_title: "Annual review".to_string(),
            statistics: ReportStatistics::default(),
            generated_at: Timestamp::now(),
        }
    }

    #[test]
    fn builder_sets_pandoc_path_and_timeout() {
        let renderer = PandocReportRenderer::new()
            .with_pandoc_path("/usr/local/bin/pandoc")
            .with_pdf_timeout(90);

        assert_eq!(renderer.pandoc_command(), "/usr/local/bin/pandoc");
        assert_eq!(renderer.pdf_timeout_secs, 90);
    }

    #[test]
    fn from_config_uses_report_section() {
        let config = ReportConfig {
            pandoc_path: Some("/opt/pandoc".to_string()),
            pdf_timeout_secs: 45,
            ..ReportConfig::default()
        };
        let renderer = PandocReportRenderer::from_config(&config);

        assert_eq!(renderer.pandoc_command(), "/opt/pandoc");
        assert_eq!(renderer.pdf_timeout_secs, 45);
        assert_eq!(renderer.format(), ReportFormat::Pdf);
    }

    #[tokio::test]
    async fn missing_pandoc_is_service_unavailable() {
        let renderer = PandocReportRenderer::new().with_pandoc_path("/nonexistent/pandoc-binary");

        let err = renderer.render(&document()).await.unwrap_err();
        assert!(matches!(err, RenderError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn chart_is_written_into_scratch_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = PandocReportRenderer::write_chart(dir.path(), &ChartImage::png(vec![1, 2, 3]))
            .await
            .unwrap();

        assert!(path.ends_with("chart.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
