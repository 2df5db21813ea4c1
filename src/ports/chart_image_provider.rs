//! Chart Image Provider Port - Line chart images for reports.
//!
//! Renderers describe the comparison chart with a `LineChartSpec` and embed
//! whatever image the provider returns.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::report::ReportStatistics;

/// Port for producing chart images.
#[async_trait]
pub trait ChartImageProvider: Send + Sync {
    /// Renders a line chart.
    ///
    /// No retries are performed; transient failures surface as `ChartError`.
    async fn line_chart(&self, spec: &LineChartSpec) -> Result<ChartImage, ChartError>;
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Description of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub y_min: f64,
    pub y_max: f64,
}

impl LineChartSpec {
    /// Comparison chart of per-question scores, one line per criteria series.
    ///
    /// X labels are the rating rows' indexes. Values are the series' already
    /// formatted strings, so the chart shows the same numbers as the tables.
    pub fn comparison(statistics: &ReportStatistics) -> Self {
        let labels = statistics
            .rating_statistics
            .iter()
            .map(|stat| stat.index.to_string())
            .collect();

        let series = statistics
            .criteria_series
            .iter()
            .map(|criteria| ChartSeries {
                label: criteria.title.clone(),
                values: criteria
                    .values
                    .iter()
                    .map(|value| value.parse::<f64>().unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        Self {
            title: "Average score by relationship".to_string(),
            labels,
            series,
            y_min: 0.0,
            y_max: 5.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// An encoded chart image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ChartImage {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "image/png".to_string(),
        }
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/svg+xml" => "svg",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// Errors from the chart image provider.
#[derive(Debug, Clone, Error)]
pub enum ChartError {
    #[error("Chart service unreachable: {0}")]
    Transport(String),

    #[error("Chart service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Chart service returned an unusable response: {0}")]
    InvalidResponse(String),
}
