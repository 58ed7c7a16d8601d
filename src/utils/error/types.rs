//! Error types for the loader

use thiserror::Error;

/// Result type alias for the loader
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Run-level error type
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token exchange failed or produced no usable token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The identifier source could not be read
    #[error("Identifier source unavailable: {0}")]
    SourceUnavailable(String),

    /// Nothing to process after source resolution
    #[error("No identifiers to process")]
    EmptyIdentifiers,

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Workbook reading errors
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal errors, such as a worker task that panicked
    #[error("Internal error: {0}")]
    Internal(String),
}
