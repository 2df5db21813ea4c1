//! HTTP handlers for report endpoints.
//!
//! These handlers connect axum routes to the report query handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::report::{
    GenerateReportHandler, GenerateReportQuery, GetReportStatisticsHandler,
    GetReportStatisticsQuery, ReportPipeline,
};
use crate::domain::foundation::FormId;
use crate::domain::report::{ReportError, ReportStatisticsBuilder};
use crate::ports::{RenderedReport, ReportRenderer, SurveyReader};

use super::dto::{ErrorResponse, HealthResponse, ReportStatisticsResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct ReportAppState {
    pub survey_reader: Arc<dyn SurveyReader>,
    pub renderer: Arc<dyn ReportRenderer>,
    pub builder: ReportStatisticsBuilder,
    pub fetch_timeout: Duration,
}

impl ReportAppState {
    fn pipeline(&self) -> ReportPipeline {
        ReportPipeline::new(self.survey_reader.clone(), self.builder, self.fetch_timeout)
    }

    pub fn generate_report_handler(&self) -> GenerateReportHandler {
        GenerateReportHandler::new(self.pipeline(), self.renderer.clone())
    }

    pub fn statistics_handler(&self) -> GetReportStatisticsHandler {
        GetReportStatisticsHandler::new(self.pipeline())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/forms/:form_id/report - Download the rendered report
pub async fn download_report(
    State(state): State<ReportAppState>,
    Path(form_id): Path<String>,
) -> Result<Response, ReportApiError> {
    let form_id = parse_form_id(&form_id)?;
    let report = state
        .generate_report_handler()
        .handle(GenerateReportQuery { form_id })
        .await?;

    attachment(report)
}

/// GET /api/forms/:form_id/report/statistics - Statistics preview as JSON
pub async fn get_report_statistics(
    State(state): State<ReportAppState>,
    Path(form_id): Path<String>,
) -> Result<impl IntoResponse, ReportApiError> {
    let form_id = parse_form_id(&form_id)?;
    let document = state
        .statistics_handler()
        .handle(GetReportStatisticsQuery { form_id })
        .await?;

    Ok(Json(ReportStatisticsResponse::from(document)))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

fn parse_form_id(raw: &str) -> Result<FormId, ReportApiError> {
    raw.parse::<FormId>()
        .map_err(|_| ReportApiError::InvalidFormId(raw.to_string()))
}

fn attachment(report: RenderedReport) -> Result<Response, ReportApiError> {
    let content_type = HeaderValue::from_str(&report.content_type)
        .map_err(|e| ReportApiError::Report(ReportError::Render(e.to_string())))?;
    let disposition = HeaderValue::from_str(&content_disposition(&report.filename))
        .map_err(|e| ReportApiError::Report(ReportError::Render(e.to_string())))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.content,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts report errors to HTTP responses.
#[derive(Debug)]
pub enum ReportApiError {
    InvalidFormId(String),
    Report(ReportError),
}

impl From<ReportError> for ReportApiError {
    fn from(err: ReportError) -> Self {
        Self::Report(err)
    }
}

impl IntoResponse for ReportApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ReportApiError::InvalidFormId(raw) => {
                let body = ErrorResponse::new("BAD_REQUEST", format!("Invalid form ID: {}", raw));
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            ReportApiError::Report(err) => err,
        };

        let status = match &err {
            ReportError::NotFound { .. } => StatusCode::NOT_FOUND,
            ReportError::DataShape { .. } | ReportError::InvalidData(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            e if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, code = %err.code(), "Report request failed");
        } else {
            tracing::warn!(error = %err, code = %err.code(), "Report request rejected");
        }

        let body = ErrorResponse::new(err.code().to_string(), err.to_string())
            .retryable(err.is_retryable());
        (status, Json(body)).into_response()
    }
}
