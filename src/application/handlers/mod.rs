//! Application handlers.
//!
//! Query handlers that orchestrate the report engine over its ports.

pub mod report;

pub use report::{
    GenerateReportHandler, GenerateReportQuery, GetReportStatisticsHandler,
    GetReportStatisticsQuery, ReportPipeline,
};
