//! Report handlers.
//!
//! Both handlers share `ReportPipeline`: fetch form, template, questions and
//! feedback under a bounded timeout, then build statistics.

mod generate_report;
mod get_report_statistics;
mod report_pipeline;

pub use generate_report::{GenerateReportHandler, GenerateReportQuery};
pub use get_report_statistics::{GetReportStatisticsHandler, GetReportStatisticsQuery};
pub use report_pipeline::ReportPipeline;
