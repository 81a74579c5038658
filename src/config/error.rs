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
    #[error("Data directory must not be empty")]
    EmptyDataDir,

    #[error("Assessment storage key must not be empty")]
    EmptyStorageKey,

    #[error("Invalid assessment storage key: {0}")]
    InvalidStorageKey(String),

    #[error("Log filter must not be empty")]
    EmptyLogFilter,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
