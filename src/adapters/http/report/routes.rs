//! Axum router configuration for report endpoints.

use axum::{routing::get, Router};

use super::handlers::{download_report, get_report_statistics, health, ReportAppState};

/// Create the report API router.
///
/// # Routes
///
/// - `GET /forms/:form_id/report` - Download the rendered report
/// - `GET /forms/:form_id/report/statistics` - Statistics preview as JSON
pub fn report_routes() -> Router<ReportAppState> {
    Router::new()
        .route("/forms/:form_id/report", get(download_report))
        .route("/forms/:form_id/report/statistics", get(get_report_statistics))
}

/// Create the complete application router.
///
/// Report routes are mounted under `/api`; `/health` sits at the root.
///
/// # Example
///
/// ```ignore
/// let app = report_router().with_state(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn report_router() -> Router<ReportAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", report_routes())
}
