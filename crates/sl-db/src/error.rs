//! Error types for sl-db

use thiserror::Error;

/// Store operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table not found: {0}")]
    TableNotFound(String),

    /// Schema metadata could not be read (D004)
    #[error("[D004] Schema introspection failed for {table}: {message}")]
    IntrospectionError { table: String, message: String },

    /// Connection could not be released cleanly (D005)
    #[error("[D005] Database close failed: {0}")]
    CloseError(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
