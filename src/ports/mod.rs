//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SurveyReader` - Read access to forms, templates, questions, feedback
//! - `ReportRenderer` - Turns a report document into file bytes
//! - `ChartImageProvider` - Produces the comparison line chart image

mod chart_image_provider;
mod report_renderer;
mod survey_reader;

pub use chart_image_provider::{ChartError, ChartImage, ChartImageProvider, ChartSeries, LineChartSpec};
pub use report_renderer::{RenderError, RenderedReport, ReportFormat, ReportRenderer};
pub use survey_reader::{SurveyReadError, SurveyReader};
