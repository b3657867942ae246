//! Error types for sl-core

use thiserror::Error;

/// Core error type for Schemalift
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Migration spec is not well-formed
    #[error("[E004] Invalid migration spec for {target}: {reason}")]
    InvalidSpec { target: String, reason: String },

    /// E005: Empty identifier where a name is required
    #[error("[E005] {kind} must not be empty")]
    EmptyIdentifier { kind: &'static str },

    /// E006: Column type fragment rejected
    #[error("[E006] Invalid column type '{value}': expected a type name with optional (precision, scale) and []")]
    InvalidSqlType { value: String },

    /// E007: IO error with file path context
    #[error("[E007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
