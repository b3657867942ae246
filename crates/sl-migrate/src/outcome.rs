//! Run outcomes

use crate::error::{FailureKind, MigrationError};
use sl_db::ColumnDescriptor;
use std::fmt;

/// The single result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The column was missing and the store acknowledged the `ADD COLUMN`
    Applied,
    /// The column was already there; nothing was executed
    AlreadyPresent,
    /// The run stopped at the failing step
    Failed(MigrationError),
}

impl Outcome {
    /// `Applied` and `AlreadyPresent` both count as success.
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }

    /// Short machine-friendly label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::AlreadyPresent => "already_present",
            Outcome::Failed(_) => "failed",
        }
    }

    pub fn error(&self) -> Option<&MigrationError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error().map(MigrationError::kind)
    }

    /// Turn a failure into `Err` so callers can use `?`.
    pub fn into_result(self) -> Result<Outcome, MigrationError> {
        match self {
            Outcome::Failed(err) => Err(err),
            success => Ok(success),
        }
    }
}

impl From<Result<Outcome, MigrationError>> for Outcome {
    fn from(result: Result<Outcome, MigrationError>) -> Self {
        result.unwrap_or_else(Outcome::Failed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => f.write_str("applied"),
            Outcome::AlreadyPresent => f.write_str("already present"),
            Outcome::Failed(err) => write!(f, "failed ({}): {}", err.kind(), err),
        }
    }
}

/// What a read-only check found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// The column exists, as described by the store
    Present(ColumnDescriptor),
    /// The column is missing; this statement would add it
    Missing { statement: String },
}

impl Pending {
    pub fn is_pending(&self) -> bool {
        matches!(self, Pending::Missing { .. })
    }
}
