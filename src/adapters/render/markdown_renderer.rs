//! Markdown renderer: the composed Markdown as the download itself.

use async_trait::async_trait;

use crate::domain::report::ReportDocument;
use crate::ports::{RenderError, RenderedReport, ReportFormat, ReportRenderer};

use super::MarkdownReport;

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReportRenderer;

impl MarkdownReportRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportRenderer for MarkdownReportRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }

    async fn render(&self, document: &ReportDocument) -> Result<RenderedReport, RenderError> {
        let markdown = MarkdownReport::compose(document, None);
        Ok(RenderedReport::new(
            markdown.into_bytes(),
            ReportFormat::Markdown,
            document,
        ))
    }
}
