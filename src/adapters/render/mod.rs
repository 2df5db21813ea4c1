//! Report renderer adapters.
//!
//! - `MarkdownReportRenderer` - plain Markdown, no chart
//! - `HtmlReportRenderer` - pulldown-cmark HTML with the chart inlined as a data URI
//! - `PandocReportRenderer` - PDF through an external Pandoc process

mod html_renderer;
mod markdown_renderer;
mod markdown_report;
mod pandoc_renderer;

pub use html_renderer::HtmlReportRenderer;
pub use markdown_renderer::MarkdownReportRenderer;
pub use markdown_report::MarkdownReport;
pub use pandoc_renderer::PandocReportRenderer;

use std::sync::Arc;

use crate::domain::report::ReportDocument;
use crate::ports::{ChartImage, ChartImageProvider, LineChartSpec, RenderError};

/// Fetches the comparison chart when a provider is configured and there is
/// something to plot.
async fn comparison_chart(
    provider: Option<&Arc<dyn ChartImageProvider>>,
    document: &ReportDocument,
) -> Result<Option<ChartImage>, RenderError> {
    let Some(provider) = provider else {
        return Ok(None);
    };
    let spec = LineChartSpec::comparison(&document.statistics);
    if spec.is_empty() {
        return Ok(None);
    }
    let image = provider.line_chart(&spec).await?;
    Ok(Some(image))
}
