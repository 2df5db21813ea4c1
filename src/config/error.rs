//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host address")]
    InvalidHost,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Request timeout of {request_secs}s is shorter than the report budget of {budget_secs}s")]
    RequestTimeoutTooShort { request_secs: u64, budget_secs: u64 },

    #[error("Database acquire timeout exceeds the report fetch timeout")]
    AcquireTimeoutExceedsFetch,

    #[error("Chart service URL must be http(s)")]
    InvalidChartUrl,

    #[error("Chart width and height must be positive")]
    InvalidChartSize,
}
