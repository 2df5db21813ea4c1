//! HTTP adapters - REST API implementations.

pub mod report;

pub use report::{report_router, ReportAppState};
