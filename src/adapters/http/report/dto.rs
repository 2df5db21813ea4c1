//! HTTP DTOs (Data Transfer Objects) for report endpoints.

use serde::Serialize;

use crate::domain::report::{ReportDocument, ReportStatistics, Respondent};

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Statistics preview of a form's report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatisticsResponse {
    pub form_id: String,
    pub respondent: Respondent,
    pub template_title: String,
    #[serde(flatten)]
    pub statistics: ReportStatistics,
    /// RFC 3339 generation time.
    pub generated_at: String,
}

impl From<ReportDocument> for ReportStatisticsResponse {
    fn from(document: ReportDocument) -> Self {
        Self {
            form_id: document.form_id.to_string(),
            respondent: document.respondent,
            template_title: document.template_title,
            statistics: document.statistics,
            generated_at: document.generated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Whether retrying the same request may succeed.
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            retryable: false,
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}
