//! HTML renderer built on pulldown-cmark.
//!
//! The chart image is inlined as a base64 data URI so the output is a single
//! self-contained file.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pulldown_cmark::{html, Event, Options, Parser};

use crate::domain::report::ReportDocument;
use crate::ports::{
    ChartImage, ChartImageProvider, RenderError, RenderedReport, ReportFormat, ReportRenderer,
};

use super::{comparison_chart, MarkdownReport};

/// Renders reports as standalone HTML pages.
#[derive(Clone)]
pub struct HtmlReportRenderer {
    chart: Option<Arc<dyn ChartImageProvider>>,
    include_default_css: bool,
}

impl HtmlReportRenderer {
    pub fn new() -> Self {
        Self {
            chart: None,
            include_default_css: true,
        }
    }

    /// Embed the comparison chart produced by `provider`.
    pub fn with_chart_provider(mut self, provider: Arc<dyn ChartImageProvider>) -> Self {
        self.chart = Some(provider);
        self
    }

    /// Disable default CSS styling.
    pub fn without_default_css(mut self) -> Self {
        self.include_default_css = false;
        self
    }

    /// Markdown body to HTML fragment. Raw HTML in the source is escaped.
    pub fn markdown_to_html(markdown: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(markdown, options).map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        });
        let mut body = String::new();
        html::push_html(&mut body, parser);
        body
    }

    fn wrap_html(&self, body: String, title: &str) -> String {
        let css = if self.include_default_css { DEFAULT_CSS } else { "" };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="feedback-report">
{body}
    </article>
</body>
</html>"#,
            title = html_escape(title),
            css = css,
            body = body
        )
    }
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRenderer for HtmlReportRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    async fn render(&self, document: &ReportDocument) -> Result<RenderedReport, RenderError> {
        let chart = comparison_chart(self.chart.as_ref(), document).await?;
        let chart_uri = chart.as_ref().map(data_uri);

        let markdown = MarkdownReport::compose(document, chart_uri.as_deref());
        let title = format!("{} - {}", document.template_title, document.respondent.full_name);
        let page = self.wrap_html(Self::markdown_to_html(&markdown), &title);

        Ok(RenderedReport::new(page.into_bytes(), ReportFormat::Html, document))
    }
}

fn data_uri(image: &ChartImage) -> String {
    format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes))
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const DEFAULT_CSS: &str = r#"
:root {
    --primary-color: #4e79a7;
    --text-color: #1f2937;
    --border-color: #e5e7eb;
    --header-bg: #f3f4f6;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
    font-size: 15px;
    line-height: 1.5;
    color: var(--text-color);
    max-width: 960px;
    margin: 0 auto;
    padding: 2rem;
}

h1 {
    border-bottom: 2px solid var(--primary-color);
    padding-bottom: 0.5rem;
}

h2 {
    border-bottom: 1px solid var(--border-color);
    padding-bottom: 0.25rem;
    margin-top: 2em;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin: 1em 0;
}

th, td {
    padding: 0.4rem 0.6rem;
    border: 1px solid var(--border-color);
    text-align: center;
}

th:nth-child(2), td:nth-child(2) {
    text-align: left;
}

th {
    background-color: var(--header-bg);
}

img {
    max-width: 100%;
}

@media print {
    body {
        font-size: 11pt;
        padding: 0;
    }

    h2, h3 {
        page-break-after: avoid;
    }

    table, img {
        page-break-inside: avoid;
    }
}
"#;

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::render::test_support::StubChartProvider;
    use crate::domain::foundation::{FormId, QuestionId, Timestamp};
    use crate::domain::report::{QuestionStatistic, RatingCounts, ReportError, ReportStatistics, Respondent};

    fn document(with_ratings: bool) -> ReportDocument {
        let rating_statistics = if with_ratings {
            vec![QuestionStatistic {
                index: 1,
                question_id: QuestionId::new(),
                title: "Delegates <well>".to_string(),
                self_point: 3.0,
                avg_senior_point: 4.5,
                avg_peer_point: 0.0,
                avg_subordinate_point: 0.0,
                count_senior: RatingCounts::default(),
                count_peer: RatingCounts::default(),
                count_subordinate: RatingCounts::default(),
            }]
        } else {
            vec![]
        };
        ReportDocument {
            form_id: FormId::new(),
            respondent: Respondent {
                full_name: "Jane Doe".to_string(),
                position: "Team Lead".to_string(),
                gender_salutation: "Ms.".to_string(),
            },
            template_title: "Annual review".to_string(),
            statistics: ReportStatistics {
                rating_statistics,
                ..ReportStatistics::default()
            },
            generated_at: Timestamp::from_unix_secs(1705318245).unwrap(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Rendering
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn renders_full_page_with_tables() {
        let report = HtmlReportRenderer::new().render(&document(true)).await.unwrap();
        let html = String::from_utf8(report.content).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Annual review - Jane Doe</title>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("Delegates &lt;well&gt;"));
        assert!(html.contains("--primary-color"));
        assert_eq!(report.filename, "JaneDoe20240115113045.html");
    }

    #[tokio::test]
    async fn embeds_chart_as_data_uri() {
        let provider = Arc::new(StubChartProvider::ok());
        let renderer = HtmlReportRenderer::new().with_chart_provider(provider.clone());

        let report = renderer.render(&document(true)).await.unwrap();
        let html = String::from_utf8(report.content).unwrap();

        assert!(html.contains("src=\"data:image/png;base64,iVBORw==\""));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn skips_chart_when_nothing_to_plot() {
        let provider = Arc::new(StubChartProvider::ok());
        let renderer = HtmlReportRenderer::new().with_chart_provider(provider.clone());

        renderer.render(&document(false)).await.unwrap();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn chart_failure_fails_render_as_retryable() {
        let renderer =
            HtmlReportRenderer::new().with_chart_provider(Arc::new(StubChartProvider::failing()));

        let err = renderer.render(&document(true)).await.unwrap_err();
        assert!(matches!(err, RenderError::Chart(_)));
        assert!(ReportError::from(err).is_retryable());
    }

    #[tokio::test]
    async fn without_css_leaves_style_empty() {
        let report = HtmlReportRenderer::new()
            .without_default_css()
            .render(&document(false))
            .await
            .unwrap();
        let html = String::from_utf8(report.content).unwrap();
        assert!(!html.contains("--primary-color"));
    }

    #[test]
    fn raw_html_in_answers_is_escaped() {
        let html = HtmlReportRenderer::markdown_to_html("- <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_escape_escapes_special_chars() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
