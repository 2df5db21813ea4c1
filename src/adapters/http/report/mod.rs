//! HTTP adapter for report endpoints.
//!
//! - `GET /api/forms/:form_id/report` - Download the rendered report
//! - `GET /api/forms/:form_id/report/statistics` - Statistics preview as JSON
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ReportApiError, ReportAppState};
pub use routes::{report_router, report_routes};
