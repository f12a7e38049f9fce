//! Error types for nbheader
//!
//! This module defines all error types used throughout the extension core,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for nbheader operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, host interactions, and header maintenance.
#[derive(Error, Debug)]
pub enum NbheaderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host environment errors (edit submission, persistence)
    #[error("Host error: {0}")]
    Host(String),

    /// No document matching the given identity is known to the host
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    /// The host rejected an edit request
    #[error("Edit rejected for document: {0}")]
    EditRejected(String),

    /// Scenario file errors (simulate command)
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regex compilation errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for nbheader operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
