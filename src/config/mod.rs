//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FEEDBACK_REPORT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use feedback_report::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reports rendered as {}", config.report.format);
//! ```

mod chart;
mod database;
mod error;
mod report;
mod server;

pub use chart::ChartConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use report::ReportConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables,
/// then hand the sections to the components that need them.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL survey store)
    pub database: DatabaseConfig,

    /// Report generation settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Chart image service settings
    #[serde(default)]
    pub chart: ChartConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FEEDBACK_REPORT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FEEDBACK_REPORT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FEEDBACK_REPORT__DATABASE__URL=...` -> `database.url = ...`
    /// - `FEEDBACK_REPORT__REPORT__INDEX_NUMBERING=shared_scan`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FEEDBACK_REPORT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.report.validate()?;
        self.chart.validate()?;

        let budget = self.report.pipeline_budget();
        if self.server.request_timeout() < budget {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                budget_secs: budget.as_secs(),
            });
        }
        if self.database.acquire_timeout() > self.report.fetch_timeout() {
            return Err(ValidationError::AcquireTimeoutExceedsFetch);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
