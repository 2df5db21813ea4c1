//! Chart image service configuration (QuickChart)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Chart image service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Base URL of the chart rendering service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional API key for hosted plans
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl ChartConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate chart configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidChartUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::InvalidChartSize);
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_base_url() -> String {
    "https://quickchart.io".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}
