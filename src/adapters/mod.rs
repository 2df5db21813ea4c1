//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Survey store reader (PostgreSQL)
//! - `memory` - In-memory survey store for tests and development
//! - `chart` - QuickChart line-chart images
//! - `render` - Markdown, HTML and PDF report renderers
//! - `http` - axum REST endpoints

pub mod chart;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod render;

pub use chart::{QuickChartConfig, QuickChartProvider};
pub use memory::InMemorySurveyStore;
pub use postgres::PostgresSurveyReader;
pub use render::{HtmlReportRenderer, MarkdownReportRenderer, PandocReportRenderer};
