//! QuickChart Provider - Implementation of ChartImageProvider over the QuickChart HTTP API.
//!
//! Posts a Chart.js configuration to `{base_url}/chart` and receives a PNG.
//!
//! # Configuration
//!
//! ```ignore
//! let provider = QuickChartProvider::new(QuickChartConfig::from(&app_config.chart))?;
//! let image = provider.line_chart(&LineChartSpec::comparison(&statistics)).await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::ChartConfig;
use crate::ports::{ChartError, ChartImage, ChartImageProvider, LineChartSpec};

/// Line colors, one per series in plotting order.
const SERIES_COLORS: [&str; 4] = ["#4e79a7", "#e15759", "#59a14f", "#f28e2b"];

/// Configuration for the QuickChart provider.
#[derive(Debug, Clone)]
pub struct QuickChartConfig {
    api_key: Option<Secret<String>>,
    pub base_url: String,
    pub timeout: Duration,
    pub width: u32,
    pub height: u32,
}

impl QuickChartConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
            width: 800,
            height: 400,
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the image size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl From<&ChartConfig> for QuickChartConfig {
    fn from(config: &ChartConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            width: config.width,
            height: config.height,
        }
    }
}

/// Request body accepted by `POST /chart`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartRequest<'a> {
    chart: Value,
    width: u32,
    height: u32,
    format: &'static str,
    background_color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
}

/// QuickChart API provider implementation.
pub struct QuickChartProvider {
    config: QuickChartConfig,
    client: Client,
}

impl QuickChartProvider {
    /// Creates a provider; fails only if the HTTP client cannot be built.
    pub fn new(config: QuickChartConfig) -> Result<Self, ChartError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChartError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self) -> String {
        format!("{}/chart", self.config.base_url.trim_end_matches('/'))
    }

    fn request_body<'a>(&'a self, spec: &LineChartSpec) -> ChartRequest<'a> {
        ChartRequest {
            chart: chartjs_line_config(spec),
            width: self.config.width,
            height: self.config.height,
            format: "png",
            background_color: "white",
            key: self.config.api_key.as_ref().map(|k| k.expose_secret().as_str()),
        }
    }
}

#[async_trait]
impl ChartImageProvider for QuickChartProvider {
    async fn line_chart(&self, spec: &LineChartSpec) -> Result<ChartImage, ChartError> {
        let response = self
            .client
            .post(self.chart_url())
            .json(&self.request_body(spec))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChartError::Transport(format!(
                        "Timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    ChartError::Transport(format!("Connection failed: {}", e))
                } else {
                    ChartError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChartError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| "image/png".to_string());
        if !mime_type.starts_with("image/") {
            return Err(ChartError::InvalidResponse(format!(
                "unexpected content type {}",
                mime_type
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ChartError::Transport(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ChartError::InvalidResponse("empty image body".to_string()));
        }

        tracing::debug!(size = bytes.len(), %mime_type, "Chart image received");
        Ok(ChartImage {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}

/// Chart.js configuration for a line chart.
fn chartjs_line_config(spec: &LineChartSpec) -> Value {
    let datasets: Vec<Value> = spec
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            json!({
                "label": series.label,
                "data": series.values,
                "fill": false,
                "borderColor": color,
                "backgroundColor": color,
            })
        })
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": spec.labels,
            "datasets": datasets,
        },
        "options": {
            "title": { "display": true, "text": spec.title },
            "scales": {
                "yAxes": [{ "ticks": { "min": spec.y_min, "max": spec.y_max, "stepSize": 1 } }],
            },
        },
    })
}
