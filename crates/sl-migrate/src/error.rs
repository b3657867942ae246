//! Error types for sl-migrate

use serde::Serialize;
use sl_db::DbError;
use std::fmt;
use thiserror::Error;

/// Why a run failed. Every variant keeps the store's own message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// The store could not be opened (X001)
    #[error("[X001] Cannot open store at {location}: {message}")]
    ConnectionFailure { location: String, message: String },

    /// The table's schema could not be read (X002)
    #[error("[X002] Cannot read schema of {table}: {message}")]
    IntrospectionFailure { table: String, message: String },

    /// The target table does not exist (X003)
    #[error("[X003] Target table {table} does not exist: {message}")]
    TargetMissing { table: String, message: String },

    /// The store rejected the additive statement (X004)
    #[error("[X004] Store rejected `{statement}`: {message}")]
    ApplyFailure { statement: String, message: String },
}

/// Failure class, for callers that branch instead of matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    ConnectionFailure,
    IntrospectionFailure,
    TargetMissing,
    ApplyFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::ConnectionFailure => "ConnectionFailure",
            FailureKind::IntrospectionFailure => "IntrospectionFailure",
            FailureKind::TargetMissing => "TargetMissing",
            FailureKind::ApplyFailure => "ApplyFailure",
        };
        f.write_str(name)
    }
}

impl MigrationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            MigrationError::ConnectionFailure { .. } => FailureKind::ConnectionFailure,
            MigrationError::IntrospectionFailure { .. } => FailureKind::IntrospectionFailure,
            MigrationError::TargetMissing { .. } => FailureKind::TargetMissing,
            MigrationError::ApplyFailure { .. } => FailureKind::ApplyFailure,
        }
    }

    /// The underlying store message.
    pub fn store_message(&self) -> &str {
        match self {
            MigrationError::ConnectionFailure { message, .. }
            | MigrationError::IntrospectionFailure { message, .. }
            | MigrationError::TargetMissing { message, .. }
            | MigrationError::ApplyFailure { message, .. } => message,
        }
    }

    pub(crate) fn connection(location: &str, err: DbError) -> Self {
        MigrationError::ConnectionFailure {
            location: location.to_string(),
            message: err.to_string(),
        }
    }

    /// Classify an introspection error: a missing table is its own kind.
    pub(crate) fn introspection(table: &str, err: DbError) -> Self {
        let table = table.to_string();
        let message = err.to_string();
        match err {
            DbError::TableNotFound(_) => MigrationError::TargetMissing { table, message },
            _ => MigrationError::IntrospectionFailure { table, message },
        }
    }

    pub(crate) fn apply(statement: &str, err: DbError) -> Self {
        MigrationError::ApplyFailure {
            statement: statement.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for MigrationError
pub type MigrationResult<T> = Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_becomes_target_missing() {
        let err = MigrationError::introspection("ghosts", DbError::TableNotFound("ghosts".into()));
        assert_eq!(err.kind(), FailureKind::TargetMissing);
        assert!(err.store_message().contains("[D003]"));
    }

    #[test]
    fn test_other_introspection_errors_keep_message() {
        let err = MigrationError::introspection(
            "users",
            DbError::IntrospectionError {
                table: "users".into(),
                message: "catalog is locked".into(),
            },
        );
        assert_eq!(err.kind(), FailureKind::IntrospectionFailure);
        assert!(err.to_string().contains("catalog is locked"));
    }

    #[test]
    fn test_apply_failure_display_names_statement() {
        let err = MigrationError::apply(
            "ALTER TABLE \"users\" ADD COLUMN \"socials\" TEXT",
            DbError::ExecutionError("disk full".into()),
        );
        assert_eq!(err.kind(), FailureKind::ApplyFailure);
        let msg = err.to_string();
        assert!(msg.starts_with("[X004]"));
        assert!(msg.contains("ADD COLUMN"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FailureKind::TargetMissing.to_string(), "TargetMissing");
    }
}
